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

//! The signing payload and its assembly.

use crate::{
	AsyncSigner, Era, Error, Hash, Nonce, Signature, SignatureOptions, Signer, TransactionPayment,
	LOG_TARGET,
};
use tx_codec::{BytesBare, Codable, Compact, CompactLen, Encode, Output};

/// Version 1 of the payload signed to authorize an extrinsic.
///
/// The method is written without a length prefix, so the encoding can not be decoded back and
/// only [`Encode`] is implemented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtrinsicPayloadV1 {
	/// Pre-encoded call, written without a length prefix.
	pub method: BytesBare,
	/// Transaction mortality.
	pub era: Era,
	/// Sender nonce.
	pub nonce: Nonce,
	/// Tip and fee exchange.
	pub payment: TransactionPayment,
	/// Runtime spec version.
	pub spec_version: u32,
	/// Runtime transaction version.
	pub transaction_version: u32,
	/// Hash of the genesis block.
	pub genesis_hash: Hash,
	/// Hash of the block the era is checkpointed at.
	pub block_hash: Hash,
}

impl ExtrinsicPayloadV1 {
	/// Payload for `method` signed with `options`.
	pub fn from_options(method: Vec<u8>, options: &SignatureOptions) -> Result<Self, Error> {
		Ok(Self {
			method: method.into(),
			era: options.era,
			nonce: options.nonce,
			payment: options.payment(),
			spec_version: options.spec_version,
			transaction_version: options.transaction_version,
			genesis_hash: options.genesis_hash,
			block_hash: options.checkpoint()?,
		})
	}

	/// Sign the encoded payload with `key`.
	pub fn sign<S: Signer + ?Sized>(
		&self,
		signer: &S,
		key: &S::KeyMaterial,
	) -> Result<Signature, Error> {
		sign_payload(self, signer, key)
	}

	/// Sign the encoded payload with `key` through an asynchronous signer.
	pub async fn sign_async<S: AsyncSigner + ?Sized>(
		&self,
		signer: &S,
		key: &S::KeyMaterial,
	) -> Result<Signature, Error> {
		let encoded = self.encode();
		log::debug!(
			target: LOG_TARGET,
			"Signing {} bytes of payload with {:?}",
			encoded.len(),
			AsyncSigner::scheme(signer),
		);
		AsyncSigner::sign(signer, &encoded, key)
			.await
			.map(Signature)
			.map_err(|e| Error::SigningFailed(Box::new(e)))
	}
}

impl Encode for ExtrinsicPayloadV1 {
	fn size_hint(&self) -> usize {
		self.method.size_hint() +
			self.era.size_hint() +
			Compact::<Nonce>::compact_len(&self.nonce) +
			self.payment.size_hint() +
			4 + 4 + 32 + 32
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		self.method.encode_to(dest);
		write_extra(
			dest,
			self.era,
			self.nonce,
			&self.payment,
			self.spec_version,
			self.transaction_version,
			&self.genesis_hash,
			&self.block_hash,
		)
	}
}

impl Codable for ExtrinsicPayloadV1 {
	fn encode_value(&self) -> Vec<u8> {
		self.encode()
	}

	fn decode_value(&mut self, _input: &mut &[u8]) -> Result<(), tx_codec::Error> {
		Err(tx_codec::Error::NotDecodable("ExtrinsicPayloadV1"))
	}
}

/// Everything that follows the method in the payload.
fn write_extra<O: Output + ?Sized>(
	dest: &mut O,
	era: Era,
	nonce: Nonce,
	payment: &TransactionPayment,
	spec_version: u32,
	transaction_version: u32,
	genesis_hash: &Hash,
	block_hash: &Hash,
) {
	era.encode_to(dest);
	Compact(nonce).encode_to(dest);
	payment.encode_to(dest);
	spec_version.encode_to(dest);
	transaction_version.encode_to(dest);
	genesis_hash.encode_to(dest);
	block_hash.encode_to(dest);
}

/// Build the signing payload from its parts.
///
/// `method` is the pre-encoded call and is written as is. `block_hash` is the checkpoint of
/// `era`, which is the genesis hash for immortal transactions.
pub fn assemble_payload(
	method: &[u8],
	era: Era,
	nonce: Nonce,
	payment: &TransactionPayment,
	spec_version: u32,
	transaction_version: u32,
	genesis_hash: &Hash,
	block_hash: &Hash,
) -> Vec<u8> {
	let mut payload = Vec::with_capacity(method.len() + 96);
	tx_codec::encode_bytes_bare(method, &mut payload);
	write_extra(
		&mut payload,
		era,
		nonce,
		payment,
		spec_version,
		transaction_version,
		genesis_hash,
		block_hash,
	);
	log::trace!(target: LOG_TARGET, "Assembled signing payload of {} bytes", payload.len());
	payload
}

/// Encode `payload` and sign it with `key`.
pub fn sign_payload<S: Signer + ?Sized>(
	payload: &ExtrinsicPayloadV1,
	signer: &S,
	key: &S::KeyMaterial,
) -> Result<Signature, Error> {
	payload.using_encoded(|encoded| {
		log::debug!(
			target: LOG_TARGET,
			"Signing {} bytes of payload with {:?}",
			encoded.len(),
			Signer::scheme(signer),
		);
		Signer::sign(signer, encoded, key)
			.map(Signature)
			.map_err(|e| Error::SigningFailed(Box::new(e)))
	})
}
