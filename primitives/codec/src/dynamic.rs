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

//! Object-safe codec capability for heterogeneous values.

use crate::{BytesBare, Encode, Error, FullCodec};

/// A value that can be encoded and decoded in place behind a trait object.
///
/// Every [`FullCodec`] type implements it. Encode-only types implement it by refusing to decode,
/// with a permanent error.
pub trait Codable {
	/// Encode the value into a fresh buffer.
	fn encode_value(&self) -> Vec<u8>;

	/// Replace the value with one decoded from the front of `input`.
	///
	/// The value is left untouched on error.
	fn decode_value(&mut self, input: &mut &[u8]) -> Result<(), Error>;
}

impl<T: FullCodec> Codable for T {
	fn encode_value(&self) -> Vec<u8> {
		self.encode()
	}

	fn decode_value(&mut self, input: &mut &[u8]) -> Result<(), Error> {
		*self = T::decode(input)?;
		Ok(())
	}
}

impl Codable for BytesBare {
	fn encode_value(&self) -> Vec<u8> {
		self.encode()
	}

	fn decode_value(&mut self, input: &mut &[u8]) -> Result<(), Error> {
		crate::decode_bytes_bare(input).map(drop)
	}
}

/// Concatenate the encodings of `values`, in order.
pub fn encode_values(values: &[&dyn Codable]) -> Vec<u8> {
	values.iter().flat_map(|value| value.encode_value()).collect()
}
