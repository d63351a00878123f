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

//! Fixed-width values and raw byte blobs.
//!
//! Integers are little-endian. Byte blobs come in two forms: with a compact length prefix
//! (`Vec<u8>`) and bare ([`BytesBare`]). A bare blob has no prefix and no terminator, so the
//! reader must know its length from the surrounding framing. Nothing in this crate decodes one.

use crate::{
	compact::{Compact, CompactLen},
	Decode, Encode, Error, Input, Output,
};
use primitive_types::{H160, H256, H512};

/// Write `bytes` as a fixed-width field.
///
/// The width is the length of `bytes`; nothing else is written.
pub fn encode_fixed<const N: usize, O: Output + ?Sized>(bytes: &[u8; N], dest: &mut O) {
	dest.write(&bytes[..])
}

/// Read exactly `N` bytes.
pub fn decode_fixed<const N: usize, I: Input + ?Sized>(input: &mut I) -> Result<[u8; N], Error> {
	let mut buf = [0u8; N];
	input.read(&mut buf)?;
	Ok(buf)
}

/// Write the compact length of `bytes` followed by the bytes themselves.
pub fn encode_bytes_with_length<O: Output + ?Sized>(bytes: &[u8], dest: &mut O) {
	Compact(bytes.len() as u64).encode_to(dest);
	dest.write(bytes)
}

/// Read a compact length and then exactly that many bytes.
pub fn decode_bytes_with_length<I: Input>(input: &mut I) -> Result<Vec<u8>, Error> {
	let len = Compact::<u32>::decode(input)?.0 as usize;
	// Refuse before allocating: the prefix is attacker controlled.
	if len > input.remaining_len() {
		return Err(Error::UnexpectedEndOfInput { needed: len, remaining: input.remaining_len() })
	}
	let mut bytes = vec![0u8; len];
	input.read(&mut bytes)?;
	Ok(bytes)
}

/// Write `bytes` without any length prefix.
pub fn encode_bytes_bare<O: Output + ?Sized>(bytes: &[u8], dest: &mut O) {
	dest.write(bytes)
}

/// Bare byte blobs carry no framing, so they can not be decoded.
///
/// Always fails with [`Error::UnsupportedOperation`] and leaves `input` untouched.
pub fn decode_bytes_bare<I: Input>(_input: &mut I) -> Result<Vec<u8>, Error> {
	Err(Error::UnsupportedOperation("bare bytes have no length prefix and can not be decoded"))
}

/// Byte blob encoded without a length prefix.
///
/// Encode-only: see [`decode_bytes_bare`].
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct BytesBare(pub Vec<u8>);

impl BytesBare {
	/// Length of the blob, which is also the length of its encoding.
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the blob is empty.
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

impl From<Vec<u8>> for BytesBare {
	fn from(bytes: Vec<u8>) -> Self {
		Self(bytes)
	}
}

impl AsRef<[u8]> for BytesBare {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Encode for BytesBare {
	fn size_hint(&self) -> usize {
		self.0.len()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		encode_bytes_bare(&self.0, dest)
	}
}

macro_rules! impl_fixed_width_int {
	( $( $t:ty ),* $(,)? ) => { $(
		impl Encode for $t {
			fn size_hint(&self) -> usize {
				core::mem::size_of::<$t>()
			}

			fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
				encode_fixed(&self.to_le_bytes(), dest)
			}
		}

		impl Decode for $t {
			fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
				decode_fixed(input).map(<$t>::from_le_bytes)
			}
		}
	)* }
}

impl_fixed_width_int!(u8, u16, u32, u64, u128, i8, i16, i32, i64, i128);

impl Encode for bool {
	fn size_hint(&self) -> usize {
		1
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		dest.push_byte(*self as u8)
	}
}

impl Decode for bool {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		match input.read_byte()? {
			0 => Ok(false),
			1 => Ok(true),
			_ => Err(Error::InvalidValue("boolean byte must be 0x00 or 0x01")),
		}
	}
}

impl Encode for () {
	fn encode_to<O: Output + ?Sized>(&self, _dest: &mut O) {}
}

impl Decode for () {
	fn decode<I: Input>(_input: &mut I) -> Result<Self, Error> {
		Ok(())
	}
}

impl<const N: usize> Encode for [u8; N] {
	fn size_hint(&self) -> usize {
		N
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		encode_fixed(self, dest)
	}
}

impl<const N: usize> Decode for [u8; N] {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		decode_fixed(input)
	}
}

impl Encode for [u8] {
	fn size_hint(&self) -> usize {
		Compact::<u64>::compact_len(&(self.len() as u64)) + self.len()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		encode_bytes_with_length(self, dest)
	}
}

impl Encode for Vec<u8> {
	fn size_hint(&self) -> usize {
		self.as_slice().size_hint()
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		encode_bytes_with_length(self, dest)
	}
}

impl Decode for Vec<u8> {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		decode_bytes_with_length(input)
	}
}

macro_rules! impl_fixed_hash {
	( $( $t:ident ),* $(,)? ) => { $(
		impl Encode for $t {
			fn size_hint(&self) -> usize {
				$t::len_bytes()
			}

			fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
				encode_fixed(&self.0, dest)
			}
		}

		impl Decode for $t {
			fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
				decode_fixed(input).map($t)
			}
		}
	)* }
}

impl_fixed_hash!(H160, H256, H512);
