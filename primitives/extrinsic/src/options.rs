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

//! Parameters of a signature that do not come from the call itself.

use crate::{Balance, Era, Error, FeeExchange, Hash, Nonce, TransactionPayment};
use serde::{Deserialize, Serialize};

/// Everything besides the call that goes into a signing payload.
///
/// Deserializes from camelCase JSON with `0x`-prefixed hashes. Omitted `era`, `nonce`, `tip`,
/// `feeExchange` and `blockHash` take their defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureOptions {
	/// Transaction mortality.
	#[serde(default)]
	pub era: Era,
	/// Sender nonce.
	#[serde(default)]
	pub nonce: Nonce,
	/// Tip for the block author.
	#[serde(default)]
	pub tip: Balance,
	/// Pay fees in another asset.
	#[serde(default)]
	pub fee_exchange: Option<FeeExchange>,
	/// Runtime spec version.
	pub spec_version: u32,
	/// Runtime transaction version.
	pub transaction_version: u32,
	/// Hash of the genesis block.
	pub genesis_hash: Hash,
	/// Hash of the block the era is checkpointed at.
	#[serde(default)]
	pub block_hash: Option<Hash>,
}

impl SignatureOptions {
	/// Options for an immortal transaction with zero nonce and tip.
	pub fn new(genesis_hash: Hash, spec_version: u32, transaction_version: u32) -> Self {
		Self {
			era: Era::Immortal,
			nonce: 0,
			tip: 0,
			fee_exchange: None,
			spec_version,
			transaction_version,
			genesis_hash,
			block_hash: None,
		}
	}

	/// Set the sender nonce.
	#[must_use]
	pub fn nonce(mut self, nonce: Nonce) -> Self {
		self.nonce = nonce;
		self
	}

	/// Set the tip.
	#[must_use]
	pub fn tip(mut self, tip: Balance) -> Self {
		self.tip = tip;
		self
	}

	/// Pay fees through `fee_exchange`.
	#[must_use]
	pub fn fee_exchange(mut self, fee_exchange: FeeExchange) -> Self {
		self.fee_exchange = Some(fee_exchange);
		self
	}

	/// Set the era together with the hash of the block it starts from.
	#[must_use]
	pub fn era(mut self, era: Era, checkpoint: Hash) -> Self {
		self.era = era;
		self.block_hash = Some(checkpoint);
		self
	}

	/// Tip and fee exchange, as encoded in the payload.
	pub fn payment(&self) -> TransactionPayment {
		TransactionPayment { tip: self.tip, fee_exchange: self.fee_exchange }
	}

	/// Hash of the block the signature is checkpointed at.
	///
	/// Immortal transactions are checkpointed at genesis unless a block hash is given.
	pub fn checkpoint(&self) -> Result<Hash, Error> {
		match (self.block_hash, self.era) {
			(Some(hash), _) => Ok(hash),
			(None, Era::Immortal) => Ok(self.genesis_hash),
			(None, Era::Mortal(..)) => Err(Error::MissingCheckpoint),
		}
	}
}
