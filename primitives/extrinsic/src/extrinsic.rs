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

//! Extrinsics in the version 4 format, ready for submission.

use crate::{
	AsyncSigner, Era, Error, ExtrinsicPayloadV1, MultiAddress, MultiSignature, Nonce, Signature,
	SignatureOptions, Signer, TransactionPayment, LOG_TARGET,
};
use tx_codec::{Compact, CompactLen, Decode, Encode, Input, Output};

/// Current version of the extrinsic format.
pub const EXTRINSIC_FORMAT_VERSION: u8 = 4;

/// Bit of the version byte set on signed extrinsics.
const SIGNED_FLAG: u8 = 0b1000_0000;

/// Sender, signature and signed extra data of a signed extrinsic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicSignatureV4 {
	/// Sender of the extrinsic.
	pub signer: MultiAddress,
	/// Signature over the payload.
	pub signature: MultiSignature,
	/// Transaction mortality.
	pub era: Era,
	/// Sender nonce.
	pub nonce: Nonce,
	/// Tip and fee exchange.
	pub payment: TransactionPayment,
}

impl Encode for ExtrinsicSignatureV4 {
	fn size_hint(&self) -> usize {
		self.signer.size_hint() +
			self.signature.size_hint() +
			self.era.size_hint() +
			Compact::<Nonce>::compact_len(&self.nonce) +
			self.payment.size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		self.signer.encode_to(dest);
		self.signature.encode_to(dest);
		self.era.encode_to(dest);
		Compact(self.nonce).encode_to(dest);
		self.payment.encode_to(dest);
	}
}

impl Decode for ExtrinsicSignatureV4 {
	fn decode<I: Input>(input: &mut I) -> Result<Self, tx_codec::Error> {
		Ok(Self {
			signer: Decode::decode(input)?,
			signature: Decode::decode(input)?,
			era: Decode::decode(input)?,
			nonce: Compact::<Nonce>::decode(input)?.0,
			payment: Decode::decode(input)?,
		})
	}
}

/// A call, optionally signed, framed for submission.
///
/// Encoded as a compact length followed by the version byte, the signature block when signed,
/// and the call bytes filling the rest of the frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extrinsic {
	/// Signature block, `None` for unsigned extrinsics.
	pub signature: Option<ExtrinsicSignatureV4>,
	/// Pre-encoded call.
	pub method: Vec<u8>,
}

impl Extrinsic {
	/// An unsigned extrinsic for `method`.
	pub fn new_unsigned(method: Vec<u8>) -> Self {
		Self { signature: None, method }
	}

	/// A signed extrinsic for `method`.
	pub fn new_signed(method: Vec<u8>, signature: ExtrinsicSignatureV4) -> Self {
		Self { signature: Some(signature), method }
	}

	/// `true` if a signature is attached.
	pub fn is_signed(&self) -> bool {
		self.signature.is_some()
	}

	/// Sign the call with `key` on behalf of `account` and attach the signature.
	///
	/// Replaces any signature already attached.
	pub fn sign<S: Signer + ?Sized>(
		self,
		signer: &S,
		key: &S::KeyMaterial,
		account: impl Into<MultiAddress>,
		options: &SignatureOptions,
	) -> Result<Self, Error> {
		let payload = ExtrinsicPayloadV1::from_options(self.method, options)?;
		let signature = payload.sign(signer, key)?;
		Ok(Self::attach(payload, Signer::scheme(signer), signature, account.into()))
	}

	/// Sign the call through an asynchronous signer and attach the signature.
	pub async fn sign_async<S: AsyncSigner + ?Sized>(
		self,
		signer: &S,
		key: &S::KeyMaterial,
		account: impl Into<MultiAddress>,
		options: &SignatureOptions,
	) -> Result<Self, Error> {
		let payload = ExtrinsicPayloadV1::from_options(self.method, options)?;
		let signature = payload.sign_async(signer, key).await?;
		Ok(Self::attach(payload, AsyncSigner::scheme(signer), signature, account.into()))
	}

	fn attach(
		payload: ExtrinsicPayloadV1,
		scheme: crate::SignatureScheme,
		signature: Signature,
		signer: MultiAddress,
	) -> Self {
		log::debug!(
			target: LOG_TARGET,
			"Attached {:?} signature with nonce {} and era {:?}",
			scheme,
			payload.nonce,
			payload.era,
		);
		let signature = ExtrinsicSignatureV4 {
			signer,
			signature: MultiSignature::new(scheme, signature),
			era: payload.era,
			nonce: payload.nonce,
			payment: payload.payment,
		};
		Self::new_signed(payload.method.0, signature)
	}

	fn version(&self) -> u8 {
		match self.signature {
			Some(_) => EXTRINSIC_FORMAT_VERSION | SIGNED_FLAG,
			None => EXTRINSIC_FORMAT_VERSION,
		}
	}

	fn body_len(&self) -> usize {
		1 + self.signature.as_ref().map_or(0, Encode::encoded_size) + self.method.len()
	}
}

impl Encode for Extrinsic {
	fn size_hint(&self) -> usize {
		let body_len = self.body_len();
		Compact::<u64>::compact_len(&(body_len as u64)) + body_len
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		Compact(self.body_len() as u64).encode_to(dest);
		dest.push_byte(self.version());
		if let Some(signature) = &self.signature {
			signature.encode_to(dest);
		}
		tx_codec::encode_bytes_bare(&self.method, dest);
	}
}

impl Decode for Extrinsic {
	fn decode<I: Input>(input: &mut I) -> Result<Self, tx_codec::Error> {
		let body = Vec::<u8>::decode(input)?;
		let mut body = &body[..];

		let version = body.read_byte()?;
		if version & !SIGNED_FLAG != EXTRINSIC_FORMAT_VERSION {
			return Err(tx_codec::Error::InvalidValue("unsupported extrinsic version"))
		}
		let signature = if version & SIGNED_FLAG != 0 {
			Some(ExtrinsicSignatureV4::decode(&mut body)?)
		} else {
			None
		};

		Ok(Self { signature, method: body.to_vec() })
	}
}
