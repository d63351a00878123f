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

//! Codec error type.

/// Errors produced while encoding or decoding.
///
/// `UnsupportedOperation` and `NotDecodable` are permanent refusals: retrying with the same input
/// can never succeed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	/// The cursor ran out of bytes before the value was complete.
	#[error("unexpected end of input: needed {needed} bytes, {remaining} remaining")]
	UnexpectedEndOfInput {
		/// Number of bytes the decoder asked for.
		needed: usize,
		/// Number of bytes that were left in the input.
		remaining: usize,
	},
	/// A decoded compact integer does not fit into the requested type.
	#[error("compact value out of range for `{target}`")]
	ValueOutOfRange {
		/// Name of the integer type the value was decoded into.
		target: &'static str,
	},
	/// A compact integer was not encoded in its minimal form.
	#[error("compact value is not in canonical form")]
	NonCanonicalCompact,
	/// An optional presence flag was neither `0x00` nor `0x01`.
	#[error("invalid optional flag {0:#04x}")]
	InvalidDiscriminant(u8),
	/// A tagged union discriminant is not assigned to any variant.
	#[error("unknown `{union}` variant {discriminant:#04x}")]
	UnknownVariant {
		/// Name of the union type.
		union: &'static str,
		/// The discriminant read from the input.
		discriminant: u8,
	},
	/// The requested operation is not defined for this encoding.
	#[error("unsupported operation: {0}")]
	UnsupportedOperation(&'static str),
	/// The type is encode-only.
	#[error("{0} can not be decoded")]
	NotDecodable(&'static str),
	/// The bytes do not describe a valid value.
	#[error("invalid value: {0}")]
	InvalidValue(&'static str),
	/// Input was left over after decoding a complete value.
	#[error("{0} trailing bytes after decoding")]
	TrailingBytes(usize),
}
