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

//! SCALE-style binary codec used to build transaction signing payloads.
//!
//! The encoding carries no type tags: field order and width come from the static shape of the
//! value. The building blocks are:
//!
//! - fixed-width little-endian integers, booleans, byte arrays and hashes ([`primitives`]);
//! - byte blobs, either length-prefixed (`Vec<u8>`) or bare ([`BytesBare`]);
//! - minimal-width unsigned integers ([`Compact`]);
//! - optional values ([`option`]);
//! - closed tagged unions ([`TaggedUnion`]).
//!
//! Types that can only be written, such as [`BytesBare`], implement [`Encode`] without
//! [`Decode`]. The object-safe [`Codable`] capability reports a permanent error for them
//! instead.

#![warn(missing_docs)]

mod dynamic;
mod error;

pub mod compact;
pub mod io;
pub mod option;
pub mod primitives;
pub mod variant;

pub use compact::{Compact, CompactLen};
pub use dynamic::{encode_values, Codable};
pub use error::Error;
pub use io::{push_byte, read_one_byte, Input, Output, SizeCounter};
pub use option::{decode_option, encode_option};
pub use primitives::{
	decode_bytes_bare, decode_bytes_with_length, decode_fixed, encode_bytes_bare,
	encode_bytes_with_length, encode_fixed, BytesBare,
};
pub use variant::{decode_union, encode_union, DecodeWithPolicy, TaggedUnion, UnknownVariantPolicy};

/// Log target of this crate.
pub const LOG_TARGET: &str = "tx-codec";

/// A value that can be written in the codec's binary form.
pub trait Encode {
	/// Number of bytes the encoding is expected to take.
	///
	/// Only used to pre-allocate buffers, so it may be inexact.
	fn size_hint(&self) -> usize {
		0
	}

	/// Append the encoding of `self` to `dest`.
	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O);

	/// Encode `self` into a fresh buffer.
	fn encode(&self) -> Vec<u8> {
		let mut r = Vec::with_capacity(self.size_hint());
		self.encode_to(&mut r);
		r
	}

	/// Encode `self` and pass the bytes to `f`.
	fn using_encoded<R, F: FnOnce(&[u8]) -> R>(&self, f: F) -> R {
		f(&self.encode())
	}

	/// Exact number of bytes [`Encode::encode`] would produce.
	fn encoded_size(&self) -> usize {
		let mut counter = SizeCounter::default();
		self.encode_to(&mut counter);
		counter.0
	}
}

/// A value that can be read back from its binary form.
pub trait Decode: Sized {
	/// Read a value from the front of `input`.
	///
	/// On error the content of `input` is unspecified and no value is produced.
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error>;
}

/// Decode a value that must span the whole input.
pub trait DecodeAll: Decode {
	/// Decode `Self` and fail with [`Error::TrailingBytes`] if anything is left in `input`.
	fn decode_all(input: &mut &[u8]) -> Result<Self, Error>;
}

impl<T: Decode> DecodeAll for T {
	fn decode_all(input: &mut &[u8]) -> Result<Self, Error> {
		let value = T::decode(input)?;
		match input.len() {
			0 => Ok(value),
			left => Err(Error::TrailingBytes(left)),
		}
	}
}

/// Types that are both [`Encode`] and [`Decode`].
pub trait FullCodec: Encode + Decode {}

impl<T: Encode + Decode> FullCodec for T {}

impl<T: Encode + ?Sized> Encode for &T {
	fn size_hint(&self) -> usize {
		(**self).size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		(**self).encode_to(dest)
	}
}

impl<T: Encode + ?Sized> Encode for Box<T> {
	fn size_hint(&self) -> usize {
		(**self).size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		(**self).encode_to(dest)
	}
}

impl<T: Decode> Decode for Box<T> {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		T::decode(input).map(Box::new)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;

	#[test]
	fn decode_all_rejects_trailing_bytes() {
		let data = [1u8, 0, 0, 0, 9];
		assert_matches!(u32::decode_all(&mut &data[..]), Err(Error::TrailingBytes(1)));
		assert_eq!(u32::decode_all(&mut &data[..4]), Ok(1));
	}

	#[test]
	fn encoded_size_matches_encode() {
		let value = (7u64, Some(3u16));
		assert_eq!(value.0.encoded_size(), 8);
		assert_eq!(value.1.encoded_size(), value.1.encode().len());
	}

	#[test]
	fn references_encode_like_values() {
		let value = 0x0102_0304u32;
		assert_eq!((&value).encode(), value.encode());
		assert_eq!(Box::new(value).encode(), value.encode());
	}
}
