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

//! Addresses of transaction senders.

use crate::AccountId;
use tx_codec::{Compact, CompactLen, Decode, Encode, Error, Input, Output, TaggedUnion};

/// A multi-format address wrapper for on-chain accounts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MultiAddress {
	/// It's an account ID (pubkey).
	Id(AccountId),
	/// It's an account index.
	Index(u32),
	/// It's some arbitrary raw bytes.
	Raw(Vec<u8>),
	/// It's a 32 byte representation.
	Address32([u8; 32]),
	/// It's a 20 byte representation.
	Address20([u8; 20]),
}

impl From<AccountId> for MultiAddress {
	fn from(account: AccountId) -> Self {
		Self::Id(account)
	}
}

impl TaggedUnion for MultiAddress {
	const NAME: &'static str = "MultiAddress";

	fn discriminant(&self) -> u8 {
		match self {
			Self::Id(_) => 0,
			Self::Index(_) => 1,
			Self::Raw(_) => 2,
			Self::Address32(_) => 3,
			Self::Address20(_) => 4,
		}
	}

	fn variant_size_hint(&self) -> usize {
		match self {
			Self::Id(_) | Self::Address32(_) => 32,
			Self::Index(index) => Compact::<u32>::compact_len(index),
			Self::Raw(raw) => raw.size_hint(),
			Self::Address20(_) => 20,
		}
	}

	fn encode_variant_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			Self::Id(account) => account.encode_to(dest),
			Self::Index(index) => Compact(*index).encode_to(dest),
			Self::Raw(raw) => raw.encode_to(dest),
			Self::Address32(address) => address.encode_to(dest),
			Self::Address20(address) => address.encode_to(dest),
		}
	}

	fn decode_variant<I: Input>(discriminant: u8, input: &mut I) -> Result<Option<Self>, Error> {
		Ok(Some(match discriminant {
			0 => Self::Id(Decode::decode(input)?),
			1 => Self::Index(Compact::<u32>::decode(input)?.0),
			2 => Self::Raw(Decode::decode(input)?),
			3 => Self::Address32(Decode::decode(input)?),
			4 => Self::Address20(Decode::decode(input)?),
			_ => return Ok(None),
		}))
	}
}

tx_codec::impl_tagged_union_codec!(MultiAddress);
