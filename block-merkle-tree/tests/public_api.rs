use block_merkle_tree::{
    Config, DataBlock, HashError, HashFunc, MerkleTree, MerkleTreeError, Mode, Proof,
    SerializationError, verify,
};

/// A log record serialized as `seq (8 bytes BE) || message`.
struct LogRecord {
    seq: u64,
    message: String,
}

impl DataBlock for LogRecord {
    fn serialize(&self) -> Result<Vec<u8>, SerializationError> {
        if self.message.is_empty() {
            return Err(SerializationError::new(format!(
                "record {} has no message",
                self.seq
            )));
        }
        let mut out = self.seq.to_be_bytes().to_vec();
        out.extend_from_slice(self.message.as_bytes());
        Ok(out)
    }
}

fn records(count: u64) -> Vec<LogRecord> {
    (0..count)
        .map(|seq| LogRecord {
            seq,
            message: format!("event number {}", seq),
        })
        .collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[test]
fn custom_blocks_round_trip_through_proofs() {
    init_tracing();
    let log = records(37);
    let tree = MerkleTree::new(
        Some(
            Config::default()
                .with_parallel(true)
                .with_workers(3)
                .with_mode(Mode::ProofGenAndTreeBuild),
        ),
        &log,
    )
    .expect("build should succeed");

    for (i, record) in log.iter().enumerate() {
        let proof = tree.proof(i).expect("proof for every record");
        assert!(verify(record, proof, tree.root(), None).expect("verify"));
        assert_eq!(&tree.generate_proof(record).expect("lazy proof"), proof);
    }
}

#[test]
fn proofs_survive_encoding() {
    let log = records(10);
    let tree = MerkleTree::new(None, &log).expect("build should succeed");
    let root = tree.root().to_vec();

    let encoded: Vec<Vec<u8>> = tree
        .proofs()
        .expect("proofs")
        .iter()
        .map(|proof| proof.encode_to_vec().expect("encode"))
        .collect();
    drop(tree);

    for (record, bytes) in log.iter().zip(&encoded) {
        let proof = Proof::decode_from_slice(bytes).expect("decode");
        assert!(verify(record, &proof, &root, None).expect("verify"));
    }
}

#[test]
fn mixed_block_types_through_trait_objects() {
    let blocks: Vec<Box<dyn DataBlock + Sync>> = vec![
        Box::new(b"raw bytes".to_vec()),
        Box::new(String::from("a string block")),
        Box::new([7u8; 16]),
        Box::new(LogRecord {
            seq: 9,
            message: "record".to_string(),
        }),
    ];
    let tree = MerkleTree::new(None, &blocks).expect("build should succeed");
    for (i, block) in blocks.iter().enumerate() {
        let proof = tree.proof(i).expect("proof");
        assert!(tree.verify(block, proof).expect("verify"));
    }
}

#[test]
fn empty_message_fails_the_whole_build() {
    let mut log = records(20);
    log[11].message.clear();
    for config in [Config::default(), Config::default().with_parallel(true)] {
        match MerkleTree::new(Some(config), &log) {
            Err(MerkleTreeError::Serialization(err)) => {
                assert!(err.message().contains("record 11"))
            }
            other => panic!("expected serialization error, got {:?}", other),
        }
    }
}

#[test]
fn custom_hash_function_is_used_everywhere() {
    // Truncated SHA-256 keeps the fixed-length property with a 16-byte root.
    let truncated = HashFunc::new(|data: &[u8]| {
        let full = HashFunc::sha256().hash(data)?;
        Ok(full[..16].to_vec())
    });
    let log = records(6);
    let config = Config::default().with_hash_func(truncated.clone());
    let tree = MerkleTree::new(Some(config), &log).expect("build should succeed");
    assert_eq!(tree.root().len(), 16);
    let proof = tree.proof(5).expect("proof");
    assert!(proof.siblings().iter().all(|s| s.hash.len() == 16));
    assert!(verify(&log[5], proof, tree.root(), Some(&truncated)).expect("verify"));
}

#[test]
fn hash_errors_keep_their_message() {
    let failing = HashFunc::new(|_: &[u8]| Err(HashError::new("hsm offline")));
    let err = MerkleTree::new(Some(Config::default().with_hash_func(failing)), &records(4))
        .expect_err("build should fail");
    assert_eq!(err.to_string(), "hash function failed: hsm offline");
}
