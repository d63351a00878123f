// This file is part of Substrate.

// Copyright (C) Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: Apache-2.0

// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// 	http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! End-to-end payload assembly and signing.

use assert_matches::assert_matches;
use async_trait::async_trait;
use futures::executor::block_on;
use hex_literal::hex;
use std::collections::HashMap;
use tx_codec::{encode_values, Codable, DecodeAll, Encode};
use tx_extrinsic::{
	assemble_payload, blake2_256, sign_payload, AsyncSigner, Ed25519Signer, Era, Error, Extrinsic,
	ExtrinsicPayloadV1, FeeExchange, FeeExchangeV1, Hash, MultiSignature, SecretSeed,
	SignatureOptions, SignatureScheme, Signer, Sr25519Signer, TransactionPayment,
};

const ALICE: [u8; 32] = hex!("e5be9a5092b81bca64be81d212e7f2f9eba183bb7a90954f7b76361f6edb5c0a");

fn init() {
	let _ = env_logger::builder().is_test(true).try_init();
}

fn minimal_payload() -> ExtrinsicPayloadV1 {
	ExtrinsicPayloadV1::from_options(vec![0x01, 0x02], &SignatureOptions::new(Hash::zero(), 1, 1))
		.unwrap()
}

#[test]
fn minimal_payload_is_78_bytes() {
	init();

	let payload = minimal_payload();
	assert_eq!(payload.block_hash, payload.genesis_hash);

	let encoded = payload.encode();
	// method 2, era 1, nonce 1, tip 1, fee exchange 1, versions 4 + 4, hashes 32 + 32
	assert_eq!(encoded.len(), 2 + 1 + 1 + (1 + 1) + 4 + 4 + 32 + 32);
	assert_eq!(payload.payment.fee_exchange.encoded_size(), 1);

	let assembled = assemble_payload(
		&[0x01, 0x02],
		Era::Immortal,
		0,
		&TransactionPayment::new(0),
		1,
		1,
		&Hash::zero(),
		&Hash::zero(),
	);
	assert_eq!(assembled, encoded);
}

#[test]
fn payload_encoding_is_deterministic() {
	let options = SignatureOptions::new(Hash::repeat_byte(0x91), 25, 2)
		.nonce(300)
		.tip(10_000)
		.fee_exchange(FeeExchangeV1 { asset_id: 16001, max_payment: 5_000 }.into())
		.era(Era::mortal(128, 99_999), Hash::repeat_byte(0x92));
	let a = ExtrinsicPayloadV1::from_options(hex!("1f00aabb").to_vec(), &options).unwrap();
	let b = ExtrinsicPayloadV1::from_options(hex!("1f00aabb").to_vec(), &options).unwrap();
	assert_eq!(a.encode(), b.encode());
	assert_eq!(a.encode(), a.encode_value());
}

#[test]
fn deterministic_signer_produces_identical_signatures() {
	let seed = SecretSeed::new(ALICE);
	let payload = minimal_payload();
	let first = payload.sign(&Ed25519Signer, &seed).unwrap();
	let second = sign_payload(&payload, &Ed25519Signer, &seed).unwrap();
	assert_eq!(first, second);
	assert!(Ed25519Signer::verify(
		&payload.encode(),
		first.as_bytes(),
		&Ed25519Signer::public_key(&seed)
	));
}

#[test]
fn randomized_signer_produces_distinct_valid_signatures() {
	let seed = SecretSeed::new(ALICE);
	let public = Sr25519Signer::public_key(&seed).unwrap();
	let payload = minimal_payload();
	let first = payload.sign(&Sr25519Signer, &seed).unwrap();
	let second = payload.sign(&Sr25519Signer, &seed).unwrap();
	assert_ne!(first, second);
	assert!(Sr25519Signer::verify(&payload.encode(), first.as_bytes(), &public));
	assert!(Sr25519Signer::verify(&payload.encode(), second.as_bytes(), &public));
}

#[test]
fn long_payload_is_signed_over_its_hash() {
	let seed = SecretSeed::new(ALICE);
	let public = Sr25519Signer::public_key(&seed).unwrap();
	let mut payload = minimal_payload();
	payload.method = vec![0x07; 512].into();

	let encoded = payload.encode();
	assert!(encoded.len() > 256);
	let signature = payload.sign(&Sr25519Signer, &seed).unwrap();
	assert!(Sr25519Signer::verify(&encoded, signature.as_bytes(), &public));
	assert!(Sr25519Signer::verify(&blake2_256(&encoded), signature.as_bytes(), &public));
}

#[derive(Debug)]
struct UnpluggedDevice;

impl Signer for UnpluggedDevice {
	type KeyMaterial = ();
	type Error = std::io::Error;

	fn scheme(&self) -> SignatureScheme {
		SignatureScheme::Ed25519
	}

	fn sign(&self, _message: &[u8], _key: &()) -> Result<[u8; 64], Self::Error> {
		Err(std::io::Error::new(std::io::ErrorKind::NotConnected, "device unplugged"))
	}
}

#[test]
fn collaborator_failure_is_surfaced_with_its_source() {
	let error = minimal_payload().sign(&UnpluggedDevice, &()).unwrap_err();
	assert_matches!(&error, Error::SigningFailed(_));
	let source = std::error::Error::source(&error).unwrap();
	let io = source.downcast_ref::<std::io::Error>().unwrap();
	assert_eq!(io.kind(), std::io::ErrorKind::NotConnected);

	let error = block_on(minimal_payload().sign_async(&UnpluggedDevice, &())).unwrap_err();
	assert_matches!(error, Error::SigningFailed(_));
}

/// Signer that holds keys by name, standing in for a remote vault.
struct Vault {
	keys: HashMap<&'static str, SecretSeed>,
}

#[derive(Debug, thiserror::Error)]
#[error("no key named {0}")]
struct UnknownKey(String);

#[async_trait]
impl AsyncSigner for Vault {
	type KeyMaterial = str;
	type Error = UnknownKey;

	fn scheme(&self) -> SignatureScheme {
		SignatureScheme::Ed25519
	}

	async fn sign(&self, message: &[u8], key: &str) -> Result<[u8; 64], UnknownKey> {
		let seed = self.keys.get(key).ok_or_else(|| UnknownKey(key.to_owned()))?;
		Ok(Signer::sign(&Ed25519Signer, message, seed).unwrap_or_else(|e| match e {}))
	}
}

#[test]
fn async_signers_are_interchangeable() {
	let payload = minimal_payload();
	let seed = SecretSeed::new(ALICE);
	let local = payload.sign(&Ed25519Signer, &seed).unwrap();

	// Every local signer is also an async one.
	let blanket = block_on(payload.sign_async(&Ed25519Signer, &seed)).unwrap();
	assert_eq!(blanket, local);

	let vault = Vault { keys: HashMap::from([("alice", SecretSeed::new(ALICE))]) };
	let remote = block_on(payload.sign_async(&vault, "alice")).unwrap();
	assert_eq!(remote, local);

	let error = block_on(payload.sign_async(&vault, "bob")).unwrap_err();
	assert_eq!(error.to_string(), "Signing failed: no key named bob");
}

#[test]
fn signed_extrinsic_round_trip() {
	init();

	let seed = SecretSeed::new(ALICE);
	let account = Sr25519Signer::public_key(&seed).unwrap();
	let checkpoint = Hash::repeat_byte(0x33);
	let options = SignatureOptions::new(Hash::repeat_byte(0x01), 9100, 2)
		.nonce(7)
		.era(Era::mortal(64, 1_234), checkpoint);

	let xt = Extrinsic::new_unsigned(hex!("0400ff").to_vec())
		.sign(&Sr25519Signer, &seed, account, &options)
		.unwrap();
	let encoded = xt.encode();
	assert_eq!(encoded[2], 0x84);

	let decoded = Extrinsic::decode_all(&mut &encoded[..]).unwrap();
	assert_eq!(decoded, xt);

	let signature = decoded.signature.unwrap();
	let MultiSignature::Sr25519(raw) = signature.signature else { panic!("expected sr25519") };
	let payload = ExtrinsicPayloadV1::from_options(decoded.method, &options).unwrap();
	assert_eq!(payload.block_hash, checkpoint);
	assert!(Sr25519Signer::verify(&payload.encode(), raw.as_bytes(), &account));
}

#[test]
fn async_extrinsic_signing_matches_sync() {
	let seed = SecretSeed::new(ALICE);
	let account = Ed25519Signer::public_key(&seed);
	let options = SignatureOptions::new(Hash::repeat_byte(0x01), 1, 1);

	let sync = Extrinsic::new_unsigned(vec![0x00])
		.sign(&Ed25519Signer, &seed, account, &options)
		.unwrap();
	let vault = Vault { keys: HashMap::from([("alice", SecretSeed::new(ALICE))]) };
	let remote = block_on(Extrinsic::new_unsigned(vec![0x00]).sign_async(
		&vault,
		"alice",
		account,
		&options,
	))
	.unwrap();
	assert_eq!(remote, sync);
}

#[test]
fn payload_refuses_dynamic_decoding() {
	let mut payload = minimal_payload();
	let values: [&dyn Codable; 2] = [&payload.spec_version, &payload.nonce];
	assert_eq!(encode_values(&values), hex!("0100000000000000").to_vec());

	let encoded = payload.encode();
	assert_matches!(
		payload.decode_value(&mut &encoded[..]),
		Err(tx_codec::Error::NotDecodable(_))
	);
}

#[test]
fn options_from_json_feed_the_payload() {
	let json = r#"{
		"era": "immortal",
		"nonce": 1,
		"tip": 2,
		"feeExchange": {"v1": {"assetId": 16000, "maxPayment": 100}},
		"specVersion": 30,
		"transactionVersion": 5,
		"genesisHash": "0x0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a0a"
	}"#;
	let options: SignatureOptions = serde_json::from_str(json).unwrap();
	let payload = ExtrinsicPayloadV1::from_options(vec![0xde, 0xad], &options).unwrap();
	assert_eq!(
		payload.payment.fee_exchange,
		Some(FeeExchange::V1(FeeExchangeV1 { asset_id: 16000, max_payment: 100 }))
	);
	assert_eq!(
		hex::encode(&payload.encode()[..12]),
		// method | era | nonce | tip | some | v1 | asset id | max payment | spec version
		"dead000408010001fa91011e"
	);
}
