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

//! Assembly and signing of extrinsic payloads.
//!
//! An [`ExtrinsicPayloadV1`] is the exact byte sequence a key signs to authorize a call:
//!
//! ```text
//! method (bare) | era | nonce (compact) | tip (compact) | fee exchange (optional)
//!   | spec version (u32) | transaction version (u32) | genesis hash | block hash
//! ```
//!
//! The payload is built fresh for every signature and is never decoded. Signing goes through the
//! [`Signer`] seam (or [`AsyncSigner`] for remote signers), and the resulting signature can be
//! attached to an [`Extrinsic`] ready for submission.

#![warn(missing_docs)]

mod address;
mod era;
mod extrinsic;
mod options;
mod payload;
mod payment;
mod signature;
mod signer;

pub use address::MultiAddress;
pub use era::{Era, MortalEra, Period, Phase, MAX_PERIOD, MIN_PERIOD};
pub use extrinsic::{Extrinsic, ExtrinsicSignatureV4, EXTRINSIC_FORMAT_VERSION};
pub use options::SignatureOptions;
pub use payload::{assemble_payload, sign_payload, ExtrinsicPayloadV1};
pub use payment::{FeeExchange, FeeExchangeV1, TransactionPayment};
pub use signature::{
	MultiSignature, Signature, SignatureScheme, ECDSA_SIGNATURE_LEN, SIGNATURE_LEN,
};
pub use signer::{
	blake2_256, AsyncSigner, Ed25519Signer, SecretSeed, Signer, Sr25519Error,
	Sr25519Signer, MAX_UNHASHED_MESSAGE_LEN,
};

/// Log target of this crate.
pub const LOG_TARGET: &str = "tx-extrinsic";

/// Index of a transaction in the sender's transaction sequence.
pub type Nonce = u32;
/// Balance of an account.
pub type Balance = u128;
/// Identifier of an asset that can pay for fees.
pub type AssetId = u32;
/// Block and genesis hash type.
pub type Hash = primitive_types::H256;
/// Raw account identifier.
pub type AccountId = [u8; 32];

/// Errors of payload assembly and signing.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Encoding or decoding failed.
	#[error("Codec error: {0}")]
	Codec(#[from] tx_codec::Error),
	/// The signing collaborator failed.
	#[error("Signing failed: {0}")]
	SigningFailed(#[source] Box<dyn std::error::Error + Send + Sync>),
	/// A mortal era was requested without the hash of its checkpoint block.
	#[error("Mortal era requires the checkpoint block hash")]
	MissingCheckpoint,
}
