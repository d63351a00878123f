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

//! Compact (minimal width) encoding of unsigned integers.
//!
//! The two least significant bits of the first byte select the mode:
//!
//! ```text
//! ┌──────┬─────────────────────────┬──────────────────────────────────────────────┐
//! │ Mode │ Range                   │ Layout                                       │
//! ├──────┼─────────────────────────┼──────────────────────────────────────────────┤
//! │ 0b00 │ 0 -- 63                 │ 1 byte, `n << 2`                             │
//! │ 0b01 │ 64 -- 2^14 - 1          │ 2 bytes LE, `n << 2 | 0b01`                  │
//! │ 0b10 │ 2^14 -- 2^30 - 1        │ 4 bytes LE, `n << 2 | 0b10`                  │
//! │ 0b11 │ 2^30 -- 2^536 - 1       │ `(len - 4) << 2 | 0b11`, then `len` bytes LE │
//! └──────┴─────────────────────────┴──────────────────────────────────────────────┘
//! ```
//!
//! Every value has exactly one valid encoding: the decoder rejects any value written in a wider
//! mode than it needs.

use crate::{Decode, Encode, Error, Input, Output};

const MAX_SINGLE_BYTE: u128 = 0b0011_1111;
const MAX_TWO_BYTES: u128 = 0x3fff;
const MAX_FOUR_BYTES: u128 = 0x3fff_ffff;

/// Wrapper selecting the compact encoding for an unsigned integer.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Compact<T>(pub T);

impl<T> From<T> for Compact<T> {
	fn from(x: T) -> Compact<T> {
		Compact(x)
	}
}

/// Length of the compact encoding of a value, without encoding it.
pub trait CompactLen<T> {
	/// Number of bytes `Compact(*val)` encodes to.
	fn compact_len(val: &T) -> usize;
}

/// Number of little-endian bytes needed to hold `n` in big-integer mode.
fn big_int_len(n: u128) -> usize {
	16 - n.leading_zeros() as usize / 8
}

/// Number of bytes the compact encoding of `n` takes.
pub fn compact_len(n: u128) -> usize {
	match n {
		0..=MAX_SINGLE_BYTE => 1,
		0..=MAX_TWO_BYTES => 2,
		0..=MAX_FOUR_BYTES => 4,
		_ => 1 + big_int_len(n),
	}
}

/// Write `n` in compact form.
pub fn encode_compact<O: Output + ?Sized>(n: u128, dest: &mut O) {
	match n {
		0..=MAX_SINGLE_BYTE => dest.push_byte((n as u8) << 2),
		0..=MAX_TWO_BYTES => dest.write(&(((n as u16) << 2) | 0b01).to_le_bytes()),
		0..=MAX_FOUR_BYTES => dest.write(&(((n as u32) << 2) | 0b10).to_le_bytes()),
		_ => {
			let len = big_int_len(n);
			dest.push_byte((((len - 4) as u8) << 2) | 0b11);
			dest.write(&n.to_le_bytes()[..len]);
		},
	}
}

/// Read a compact integer of at most `max_bytes` significant bytes.
///
/// `target` names the destination type in [`Error::ValueOutOfRange`].
pub fn decode_compact<I: Input>(
	input: &mut I,
	max_bytes: usize,
	target: &'static str,
) -> Result<u128, Error> {
	let prefix = input.read_byte()?;
	let value = match prefix & 0b11 {
		0b00 => u128::from(prefix >> 2),
		0b01 => {
			let x = u16::from_le_bytes([prefix, input.read_byte()?]) >> 2;
			if u128::from(x) <= MAX_SINGLE_BYTE {
				return Err(Error::NonCanonicalCompact)
			}
			u128::from(x)
		},
		0b10 => {
			let mut buf = [prefix, 0, 0, 0];
			input.read(&mut buf[1..])?;
			let x = u32::from_le_bytes(buf) >> 2;
			if u128::from(x) <= MAX_TWO_BYTES {
				return Err(Error::NonCanonicalCompact)
			}
			u128::from(x)
		},
		_ => {
			let len = usize::from(prefix >> 2) + 4;
			if len > max_bytes {
				return Err(Error::ValueOutOfRange { target })
			}
			let mut buf = [0u8; 16];
			input.read(&mut buf[..len])?;
			let x = u128::from_le_bytes(buf);
			if x <= MAX_FOUR_BYTES || buf[len - 1] == 0 {
				return Err(Error::NonCanonicalCompact)
			}
			x
		},
	};
	Ok(value)
}

macro_rules! impl_compact {
	( $( $t:ty ),* $(,)? ) => { $(
		impl CompactLen<$t> for Compact<$t> {
			fn compact_len(val: &$t) -> usize {
				compact_len(*val as u128)
			}
		}

		impl Encode for Compact<$t> {
			fn size_hint(&self) -> usize {
				Self::compact_len(&self.0)
			}

			fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
				encode_compact(self.0 as u128, dest)
			}
		}

		impl Decode for Compact<$t> {
			fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
				let target = stringify!($t);
				let value = decode_compact(input, core::mem::size_of::<$t>(), target)?;
				<$t>::try_from(value).map(Compact).map_err(|_| Error::ValueOutOfRange { target })
			}
		}

		impl From<Compact<$t>> for $t {
			fn from(x: Compact<$t>) -> $t {
				x.0
			}
		}
	)* }
}

impl_compact!(u8, u16, u32, u64, u128);
