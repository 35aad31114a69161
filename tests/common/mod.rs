#![allow(dead_code)]

use std::{fs, path::PathBuf};

use iacr_dl::{Identifier, Record};

pub fn data(name: &str) -> String {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name);
    fs::read_to_string(&path).unwrap_or_else(|e| panic!("reading {}: {e}", path.display()))
}

/// The record described by `basic.html`, modified from https://ia.cr/2019/579.
pub fn basic_record() -> Record {
    Record::new(
        "BlockQuick: Super-Light Client Protocol for Blockchain",
        vec!["Dominic Letz".to_string()],
        "Today server authentication is largely handled through Public Key \
         Infrastructure (PKI) in both the private and the public sector.",
        vec![
            "cryptographic protocols / blockchain".to_string(),
            "proof of work".to_string(),
        ],
        Identifier::parse("2019/579").unwrap(),
    )
    .unwrap()
}
