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

//! Signing collaborators.
//!
//! The assembler only needs something that turns a message and opaque key material into 64
//! signature bytes. [`Ed25519Signer`] and [`Sr25519Signer`] are local implementations; remote
//! or hardware signers plug in through [`AsyncSigner`].
//!
//! Messages longer than [`MAX_UNHASHED_MESSAGE_LEN`] bytes are signed over their BLAKE2b-256
//! hash, as Substrate runtimes expect.

use crate::signature::{SignatureScheme, SIGNATURE_LEN};
use async_trait::async_trait;
use blake2::{digest::consts::U32, Blake2b, Digest};
use std::{convert::Infallible, fmt};
use zeroize::Zeroize;

/// Messages longer than this are hashed before signing.
pub const MAX_UNHASHED_MESSAGE_LEN: usize = 256;

/// Signs messages with key material it does not own.
pub trait Signer {
	/// Key material accepted by [`Signer::sign`].
	type KeyMaterial: ?Sized;
	/// Error returned when signing fails.
	type Error: std::error::Error + Send + Sync + 'static;

	/// Scheme of the produced signatures.
	fn scheme(&self) -> SignatureScheme;

	/// Sign `message` with `key`.
	fn sign(
		&self,
		message: &[u8],
		key: &Self::KeyMaterial,
	) -> Result<[u8; SIGNATURE_LEN], Self::Error>;
}

/// Asynchronous version of [`Signer`], for signers living in another process or device.
///
/// Every [`Signer`] is also an [`AsyncSigner`].
#[async_trait]
pub trait AsyncSigner: Send + Sync {
	/// Key material accepted by [`AsyncSigner::sign`].
	type KeyMaterial: ?Sized + Sync;
	/// Error returned when signing fails.
	type Error: std::error::Error + Send + Sync + 'static;

	/// Scheme of the produced signatures.
	fn scheme(&self) -> SignatureScheme;

	/// Sign `message` with `key`.
	async fn sign(
		&self,
		message: &[u8],
		key: &Self::KeyMaterial,
	) -> Result<[u8; SIGNATURE_LEN], Self::Error>;
}

#[async_trait]
impl<S> AsyncSigner for S
where
	S: Signer + Send + Sync,
	S::KeyMaterial: Sync,
{
	type KeyMaterial = S::KeyMaterial;
	type Error = S::Error;

	fn scheme(&self) -> SignatureScheme {
		Signer::scheme(self)
	}

	async fn sign(
		&self,
		message: &[u8],
		key: &Self::KeyMaterial,
	) -> Result<[u8; SIGNATURE_LEN], Self::Error> {
		Signer::sign(self, message, key)
	}
}

/// 32-byte secret seed.
///
/// Zeroed on drop and never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretSeed([u8; 32]);

impl SecretSeed {
	/// Take ownership of `seed`.
	pub fn new(seed: [u8; 32]) -> Self {
		Self(seed)
	}

	/// Copy the seed from `bytes`, zeroing the source.
	///
	/// Returns `None` if `bytes` is not 32 bytes long.
	pub fn from_bytes(bytes: &mut [u8]) -> Option<Self> {
		let seed = <[u8; 32]>::try_from(&bytes[..]).ok().map(Self);
		bytes.zeroize();
		seed
	}

	fn expose(&self) -> &[u8; 32] {
		&self.0
	}
}

impl From<[u8; 32]> for SecretSeed {
	fn from(seed: [u8; 32]) -> Self {
		Self::new(seed)
	}
}

impl fmt::Debug for SecretSeed {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "SecretSeed")
	}
}

impl Drop for SecretSeed {
	fn drop(&mut self) {
		self.0.zeroize();
	}
}

/// BLAKE2b with a 256-bit output.
pub fn blake2_256(data: &[u8]) -> [u8; 32] {
	let mut hash = [0u8; 32];
	hash.copy_from_slice(&Blake2b::<U32>::digest(data));
	hash
}

/// Call `f` with the bytes that are actually signed for `message`.
fn with_signed_bytes<R>(message: &[u8], f: impl FnOnce(&[u8]) -> R) -> R {
	if message.len() > MAX_UNHASHED_MESSAGE_LEN {
		f(&blake2_256(message))
	} else {
		f(message)
	}
}

/// Deterministic ed25519 signer.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ed25519Signer;

impl Ed25519Signer {
	/// Public key of `seed`.
	pub fn public_key(seed: &SecretSeed) -> [u8; 32] {
		ed25519_dalek::SigningKey::from_bytes(seed.expose()).verifying_key().to_bytes()
	}

	/// Check `signature` of `message` against `public`.
	pub fn verify(message: &[u8], signature: &[u8; SIGNATURE_LEN], public: &[u8; 32]) -> bool {
		use ed25519_dalek::Verifier as _;

		let Ok(public) = ed25519_dalek::VerifyingKey::from_bytes(public) else { return false };
		let signature = ed25519_dalek::Signature::from_bytes(signature);
		with_signed_bytes(message, |signed| public.verify(signed, &signature).is_ok())
	}
}

impl Signer for Ed25519Signer {
	type KeyMaterial = SecretSeed;
	type Error = Infallible;

	fn scheme(&self) -> SignatureScheme {
		SignatureScheme::Ed25519
	}

	fn sign(
		&self,
		message: &[u8],
		key: &SecretSeed,
	) -> Result<[u8; SIGNATURE_LEN], Self::Error> {
		use ed25519_dalek::Signer as _;

		let key = ed25519_dalek::SigningKey::from_bytes(key.expose());
		Ok(with_signed_bytes(message, |signed| key.sign(signed).to_bytes()))
	}
}

/// Key handling error of [`Sr25519Signer`].
#[derive(Debug, thiserror::Error)]
#[error("Sr25519 key error: {0}")]
pub struct Sr25519Error(pub schnorrkel::SignatureError);

/// Randomized sr25519 signer using the `substrate` signing context.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sr25519Signer;

impl Sr25519Signer {
	/// Signing context shared with Substrate runtimes.
	pub const SIGNING_CONTEXT: &'static [u8] = b"substrate";

	fn keypair(seed: &SecretSeed) -> Result<schnorrkel::Keypair, Sr25519Error> {
		schnorrkel::MiniSecretKey::from_bytes(seed.expose())
			.map(|mini| mini.expand_to_keypair(schnorrkel::ExpansionMode::Ed25519))
			.map_err(Sr25519Error)
	}

	/// Public key of `seed`.
	pub fn public_key(seed: &SecretSeed) -> Result<[u8; 32], Sr25519Error> {
		Self::keypair(seed).map(|pair| pair.public.to_bytes())
	}

	/// Check `signature` of `message` against `public`.
	pub fn verify(message: &[u8], signature: &[u8; SIGNATURE_LEN], public: &[u8; 32]) -> bool {
		let Ok(public) = schnorrkel::PublicKey::from_bytes(public) else { return false };
		let Ok(signature) = schnorrkel::Signature::from_bytes(signature) else { return false };
		with_signed_bytes(message, |signed| {
			public.verify_simple(Self::SIGNING_CONTEXT, signed, &signature).is_ok()
		})
	}
}

impl Signer for Sr25519Signer {
	type KeyMaterial = SecretSeed;
	type Error = Sr25519Error;

	fn scheme(&self) -> SignatureScheme {
		SignatureScheme::Sr25519
	}

	fn sign(
		&self,
		message: &[u8],
		key: &SecretSeed,
	) -> Result<[u8; SIGNATURE_LEN], Self::Error> {
		let pair = Self::keypair(key)?;
		let context = schnorrkel::signing_context(Self::SIGNING_CONTEXT);
		Ok(with_signed_bytes(message, |signed| pair.sign(context.bytes(signed)).to_bytes()))
	}
}
