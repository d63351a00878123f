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

//! Optional values: a presence flag followed by the value when present.
//!
//! The flag is always a full byte, for every inner type. `Option<bool>` is therefore two bytes
//! when present.

use crate::{Decode, Encode, Error, Input, Output};

const ABSENT: u8 = 0x00;
const PRESENT: u8 = 0x01;

/// Write an optional value given as a presence flag and a value.
///
/// When `present` is `false` only the absence flag is written and `value` is ignored.
pub fn encode_option<T: Encode + ?Sized, O: Output + ?Sized>(
	present: bool,
	value: &T,
	dest: &mut O,
) {
	if present {
		dest.push_byte(PRESENT);
		value.encode_to(dest);
	} else {
		dest.push_byte(ABSENT);
	}
}

/// Read a presence flag and, when set, the inner value using `inner`.
///
/// Errors of `inner` are returned unchanged.
pub fn decode_option<T, I, F>(input: &mut I, inner: F) -> Result<Option<T>, Error>
where
	I: Input,
	F: FnOnce(&mut I) -> Result<T, Error>,
{
	match input.read_byte()? {
		ABSENT => Ok(None),
		PRESENT => inner(input).map(Some),
		flag => Err(Error::InvalidDiscriminant(flag)),
	}
}

impl<T: Encode> Encode for Option<T> {
	fn size_hint(&self) -> usize {
		1 + self.as_ref().map_or(0, Encode::size_hint)
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			Some(value) => encode_option(true, value, dest),
			None => dest.push_byte(ABSENT),
		}
	}
}

impl<T: Decode> Decode for Option<T> {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		decode_option(input, T::decode)
	}
}
