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

//! Signatures produced over signing payloads.

use tx_codec::{Decode, Encode, Error, Input, Output, TaggedUnion};

/// Length of an ed25519 or sr25519 signature.
pub const SIGNATURE_LEN: usize = 64;

/// Length of a recoverable ecdsa signature.
pub const ECDSA_SIGNATURE_LEN: usize = 65;

/// Raw 64-byte signature returned by a signer.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature(pub [u8; SIGNATURE_LEN]);

impl Signature {
	/// Signature bytes.
	pub fn as_bytes(&self) -> &[u8; SIGNATURE_LEN] {
		&self.0
	}
}

impl From<[u8; SIGNATURE_LEN]> for Signature {
	fn from(bytes: [u8; SIGNATURE_LEN]) -> Self {
		Self(bytes)
	}
}

impl AsRef<[u8]> for Signature {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl std::fmt::Debug for Signature {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "Signature(0x")?;
		self.0.iter().try_for_each(|byte| write!(f, "{byte:02x}"))?;
		write!(f, ")")
	}
}

impl Encode for Signature {
	fn size_hint(&self) -> usize {
		SIGNATURE_LEN
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		self.0.encode_to(dest)
	}
}

impl Decode for Signature {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		<[u8; SIGNATURE_LEN]>::decode(input).map(Self)
	}
}

/// Signature scheme of a signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignatureScheme {
	/// Ed25519.
	Ed25519,
	/// Schnorr over ristretto25519.
	Sr25519,
}

/// Signature tagged with its scheme, as carried by extrinsics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiSignature {
	/// An ed25519 signature.
	Ed25519(Signature),
	/// An sr25519 signature.
	Sr25519(Signature),
	/// A recoverable ecdsa signature over secp256k1.
	Ecdsa([u8; ECDSA_SIGNATURE_LEN]),
}

impl MultiSignature {
	/// Tag `signature` with `scheme`.
	pub fn new(scheme: SignatureScheme, signature: Signature) -> Self {
		match scheme {
			SignatureScheme::Ed25519 => Self::Ed25519(signature),
			SignatureScheme::Sr25519 => Self::Sr25519(signature),
		}
	}
}

impl TaggedUnion for MultiSignature {
	const NAME: &'static str = "MultiSignature";

	fn discriminant(&self) -> u8 {
		match self {
			Self::Ed25519(_) => 0,
			Self::Sr25519(_) => 1,
			Self::Ecdsa(_) => 2,
		}
	}

	fn variant_size_hint(&self) -> usize {
		match self {
			Self::Ed25519(_) | Self::Sr25519(_) => SIGNATURE_LEN,
			Self::Ecdsa(_) => ECDSA_SIGNATURE_LEN,
		}
	}

	fn encode_variant_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			Self::Ed25519(signature) | Self::Sr25519(signature) => signature.encode_to(dest),
			Self::Ecdsa(signature) => signature.encode_to(dest),
		}
	}

	fn decode_variant<I: Input>(discriminant: u8, input: &mut I) -> Result<Option<Self>, Error> {
		Ok(Some(match discriminant {
			0 => Self::Ed25519(Decode::decode(input)?),
			1 => Self::Sr25519(Decode::decode(input)?),
			2 => Self::Ecdsa(Decode::decode(input)?),
			_ => return Ok(None),
		}))
	}
}

tx_codec::impl_tagged_union_codec!(MultiSignature);
