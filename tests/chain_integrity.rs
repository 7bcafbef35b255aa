//! Integration tests for chain construction, validation and tamper detection

use chrono::{Duration, NaiveDate};
use hashchain::blockchain::{derive_hash, Block, Blockchain, IntegrityViolation};
use hashchain::clock::ManualClock;
use hashchain::shared::SharedBlockchain;
use std::sync::Arc;

/// Helper to build a chain with reproducible timestamps
fn reproducible_chain() -> Result<Blockchain, Box<dyn std::error::Error>> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or("invalid start date")?;
    Ok(Blockchain::with_clock(Arc::new(ManualClock::new(
        start,
        Duration::seconds(1),
    ))))
}

/// Helper to rebuild `chain` with one block swapped out
fn with_block(chain: &Blockchain, at: usize, block: Block) -> Result<Blockchain, Box<dyn std::error::Error>> {
    let mut blocks = chain.blocks().to_vec();
    blocks[at] = block;
    Ok(Blockchain::from_blocks(blocks)?)
}

#[test]
fn test_two_block_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = Blockchain::new();
    chain.append("Block 1 Data");
    chain.append("Block 2 Data");

    assert_eq!(chain.len(), 3);
    let blocks = chain.blocks();
    assert_eq!(blocks[1].previous_hash(), blocks[0].hash());
    assert_eq!(blocks[2].previous_hash(), blocks[1].hash());
    assert!(chain.is_valid());

    // Overwrite block 1's payload, keeping everything else
    let b = &blocks[1];
    let tampered = with_block(
        &chain,
        1,
        Block::new(b.index(), b.previous_hash(), b.timestamp(), "tampered", b.hash()),
    )?;

    assert!(!tampered.is_valid());
    let violation = tampered.validate().unwrap_err();
    assert_eq!(violation.position(), 1);
    assert!(matches!(violation, IntegrityViolation::HashMismatch { index: 1, .. }));

    // The original chain is untouched
    assert!(chain.is_valid());

    Ok(())
}

#[test]
fn test_reproducible_hashes() -> Result<(), Box<dyn std::error::Error>> {
    let mut a = reproducible_chain()?;
    let mut b = reproducible_chain()?;
    a.append("Block 1 Data");
    b.append("Block 1 Data");

    assert_eq!(a, b);
    assert_eq!(
        a.latest().hash(),
        "52c309ccaf32db068d5d913ca438596b7bdeb5fe63f28580c2a17a0b75c25c92"
    );

    Ok(())
}

#[test]
fn test_every_field_is_tamper_evident() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = reproducible_chain()?;
    for i in 1..=4 {
        chain.append(format!("Block {} Data", i));
    }

    for at in 1..chain.len() {
        let b = chain.blocks()[at].clone();
        let variants = [
            Block::new(b.index(), b.previous_hash(), b.timestamp(), "x", b.hash()),
            Block::new(b.index(), "f".repeat(64), b.timestamp(), b.data(), b.hash()),
            Block::new(b.index(), b.previous_hash(), "1999-12-31T23:59:59.000000", b.data(), b.hash()),
            Block::new(b.index() + 100, b.previous_hash(), b.timestamp(), b.data(), b.hash()),
        ];

        for forged in variants {
            let tampered = with_block(&chain, at, forged)?;
            let violation = tampered.validate().unwrap_err();
            assert_eq!(violation.position(), at, "tamper at {} reported as {}", at, violation);
        }
    }

    Ok(())
}

#[test]
fn test_rehashed_block_breaks_the_next_link() -> Result<(), Box<dyn std::error::Error>> {
    let mut chain = reproducible_chain()?;
    chain.append("a");
    chain.append("b");

    // A forger who recomputes block 1's hash still breaks block 2's link.
    let b = &chain.blocks()[1];
    let hash = derive_hash(b.index(), b.previous_hash(), b.timestamp(), "forged");
    let tampered = with_block(
        &chain,
        1,
        Block::new(b.index(), b.previous_hash(), b.timestamp(), "forged", hash.clone()),
    )?;

    assert_eq!(
        tampered.validate(),
        Err(IntegrityViolation::LinkMismatch {
            index: 2,
            expected: hash,
            found: chain.blocks()[1].hash().to_string(),
        })
    );

    Ok(())
}

#[test]
fn test_lookup_bounds() {
    let chain = Blockchain::new();
    assert_eq!(chain.get(0), Some(chain.genesis()));
    assert!(chain.get(chain.len()).is_none());
    assert!(chain.get(usize::MAX).is_none());
}

#[test]
fn test_export_import_keeps_validity() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("chain.json");

    let mut chain = reproducible_chain()?;
    chain.append("Block 1 Data");
    chain.export_to_file(&path, true)?;

    let json = std::fs::read_to_string(&path)?;
    assert!(json.contains("\n        \"data\": \"Block 1 Data\",\n"));

    let imported = Blockchain::import_from_file(&path)?;
    assert_eq!(imported, chain);
    assert!(imported.is_valid());

    let tampered = Blockchain::from_json(&json.replace("Block 1 Data", "Block 1 Dat4"))?;
    assert_eq!(tampered.validate().unwrap_err().position(), 1);

    Ok(())
}

#[test]
fn test_shared_chain_appends_from_threads() {
    let shared = SharedBlockchain::new();
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let shared = shared.clone();
            std::thread::spawn(move || {
                for i in 0..25 {
                    shared.append(format!("{}-{}", t, i));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("appender thread panicked");
    }

    assert_eq!(shared.len(), 101);
    assert!(shared.validate().is_ok());
    assert_eq!(shared.latest().index(), 100);
}

#[test]
fn test_append_after_importing_max_index_tip() -> Result<(), Box<dyn std::error::Error>> {
    let json = r#"[{"index":18446744073709551615,"previous_hash":"0","timestamp":"2024-01-01T00:00:00.000000","data":"imported","hash":"abc"}]"#;
    let mut chain = Blockchain::from_json(json)?;

    let block = chain.append("x").clone();

    assert_eq!(block.index(), 1);
    assert_eq!(block.previous_hash(), "abc");
    assert_eq!(chain.len(), 2);
    // The imported tip itself is still reported.
    assert!(!chain.is_valid());

    Ok(())
}
