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

//! Transaction fee payment: tip and optional fee exchange.

use crate::{AssetId, Balance};
use serde::{Deserialize, Serialize};
use tx_codec::{
	Compact, CompactLen, Decode, DecodeWithPolicy, Encode, Error, Input, Output, TaggedUnion,
	UnknownVariantPolicy,
};

/// Pay fees in `asset_id`, spending at most `max_payment` of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeExchangeV1 {
	/// Asset the fee is paid with.
	pub asset_id: AssetId,
	/// Upper bound of the fee, in `asset_id` units.
	pub max_payment: Balance,
}

impl Encode for FeeExchangeV1 {
	fn size_hint(&self) -> usize {
		Compact::<AssetId>::compact_len(&self.asset_id) +
			Compact::<Balance>::compact_len(&self.max_payment)
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		Compact(self.asset_id).encode_to(dest);
		Compact(self.max_payment).encode_to(dest);
	}
}

impl Decode for FeeExchangeV1 {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		Ok(Self {
			asset_id: Compact::<AssetId>::decode(input)?.0,
			max_payment: Compact::<Balance>::decode(input)?.0,
		})
	}
}

/// Versioned fee exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeeExchange {
	/// The first and only fee exchange format.
	V1(FeeExchangeV1),
}

impl TaggedUnion for FeeExchange {
	const NAME: &'static str = "FeeExchange";

	fn discriminant(&self) -> u8 {
		match self {
			Self::V1(_) => 0,
		}
	}

	fn variant_size_hint(&self) -> usize {
		match self {
			Self::V1(v1) => v1.size_hint(),
		}
	}

	fn encode_variant_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			Self::V1(v1) => v1.encode_to(dest),
		}
	}

	fn decode_variant<I: Input>(discriminant: u8, input: &mut I) -> Result<Option<Self>, Error> {
		match discriminant {
			0 => FeeExchangeV1::decode(input).map(|v1| Some(Self::V1(v1))),
			_ => Ok(None),
		}
	}
}

tx_codec::impl_tagged_union_codec!(FeeExchange);

impl From<FeeExchangeV1> for FeeExchange {
	fn from(v1: FeeExchangeV1) -> Self {
		Self::V1(v1)
	}
}

/// How the transaction pays its fees.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPayment {
	/// Tip paid to the block author on top of the fee.
	pub tip: Balance,
	/// Pay fees in another asset.
	pub fee_exchange: Option<FeeExchange>,
}

impl TransactionPayment {
	/// Payment of `tip` in the native asset.
	pub fn new(tip: Balance) -> Self {
		Self { tip, fee_exchange: None }
	}

	/// Pay fees through `fee_exchange`.
	#[must_use]
	pub fn fee_exchange(mut self, fee_exchange: FeeExchange) -> Self {
		self.fee_exchange = Some(fee_exchange);
		self
	}
}

impl Encode for TransactionPayment {
	fn size_hint(&self) -> usize {
		Compact::<Balance>::compact_len(&self.tip) + self.fee_exchange.size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		Compact(self.tip).encode_to(dest);
		self.fee_exchange.encode_to(dest);
	}
}

impl Decode for TransactionPayment {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		Self::decode_with_policy(input, UnknownVariantPolicy::Reject)
	}
}

impl DecodeWithPolicy for TransactionPayment {
	fn decode_with_policy<I: Input>(
		input: &mut I,
		policy: UnknownVariantPolicy,
	) -> Result<Self, Error> {
		Ok(Self {
			tip: Compact::<Balance>::decode(input)?.0,
			fee_exchange: Option::<FeeExchange>::decode_with_policy(input, policy)?,
		})
	}
}
