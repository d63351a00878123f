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

//! Closed tagged unions.
//!
//! A union is written as one discriminant byte followed by the payload of the selected variant.
//! Unions are plain Rust enums, so a value always has exactly one variant and encoding can not
//! fail. Discriminants are fixed per union type and never reassigned.
//!
//! Decoding an unassigned discriminant is governed by [`UnknownVariantPolicy`].

use crate::{io::read_one_byte, Error, Input, Output, LOG_TARGET};

/// What to do when a decoded discriminant has no variant.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum UnknownVariantPolicy {
	/// Fail with [`Error::UnknownVariant`].
	#[default]
	Reject,
	/// Leave the union unset and continue.
	///
	/// The payload of the unknown variant is not consumed, because its length is unknown.
	/// Anything decoded after it from the same input is unreliable.
	Skip,
}

/// A closed set of variants, each identified by a discriminant byte.
pub trait TaggedUnion: Sized {
	/// Name used in errors and logs.
	const NAME: &'static str;

	/// Discriminant of the active variant.
	fn discriminant(&self) -> u8;

	/// Upper estimate of the payload size, excluding the discriminant.
	fn variant_size_hint(&self) -> usize {
		0
	}

	/// Write the payload of the active variant, excluding the discriminant.
	fn encode_variant_to<O: Output + ?Sized>(&self, dest: &mut O);

	/// Read the payload of the variant assigned to `discriminant`.
	///
	/// Returns `Ok(None)` without touching `input` if no variant has that discriminant.
	fn decode_variant<I: Input>(discriminant: u8, input: &mut I) -> Result<Option<Self>, Error>;
}

/// Write the discriminant of `union` followed by its payload.
pub fn encode_union<U: TaggedUnion, O: Output + ?Sized>(union: &U, dest: &mut O) {
	dest.push_byte(union.discriminant());
	union.encode_variant_to(dest);
}

/// Read a union, applying `policy` to unassigned discriminants.
///
/// `Ok(None)` is only returned under [`UnknownVariantPolicy::Skip`].
pub fn decode_union<U: TaggedUnion, I: Input>(
	input: &mut I,
	policy: UnknownVariantPolicy,
) -> Result<Option<U>, Error> {
	let discriminant = read_one_byte(input)?;
	match U::decode_variant(discriminant, input)? {
		Some(union) => Ok(Some(union)),
		None => match policy {
			UnknownVariantPolicy::Reject => Err(Error::UnknownVariant { union: U::NAME, discriminant }),
			UnknownVariantPolicy::Skip => {
				log::debug!(
					target: LOG_TARGET,
					"Skipping unknown {} variant {:#04x}",
					U::NAME,
					discriminant,
				);
				Ok(None)
			},
		},
	}
}

/// Decoding that lets the caller choose how unknown union variants are handled.
pub trait DecodeWithPolicy: Sized {
	/// Decode `Self`, applying `policy` to every union inside it.
	fn decode_with_policy<I: Input>(
		input: &mut I,
		policy: UnknownVariantPolicy,
	) -> Result<Self, Error>;
}

/// An optional union. A present flag followed by a skipped variant decodes as `None`.
impl<U: TaggedUnion> DecodeWithPolicy for Option<U> {
	fn decode_with_policy<I: Input>(
		input: &mut I,
		policy: UnknownVariantPolicy,
	) -> Result<Self, Error> {
		crate::decode_option(input, |input| decode_union::<U, _>(input, policy))
			.map(Option::flatten)
	}
}

/// Implement [`Encode`](crate::Encode) and [`Decode`](crate::Decode) for a [`TaggedUnion`].
///
/// `Decode` rejects unknown discriminants. Use [`decode_union`] or [`DecodeWithPolicy`] to skip
/// them instead.
#[macro_export]
macro_rules! impl_tagged_union_codec {
	( $( $t:ty ),* $(,)? ) => { $(
		impl $crate::Encode for $t {
			fn size_hint(&self) -> usize {
				1 + $crate::TaggedUnion::variant_size_hint(self)
			}

			fn encode_to<O: $crate::Output + ?Sized>(&self, dest: &mut O) {
				$crate::encode_union(self, dest)
			}
		}

		impl $crate::Decode for $t {
			fn decode<I: $crate::Input>(input: &mut I) -> Result<Self, $crate::Error> {
				let discriminant = $crate::read_one_byte(input)?;
				<Self as $crate::TaggedUnion>::decode_variant(discriminant, input)?.ok_or(
					$crate::Error::UnknownVariant {
						union: <Self as $crate::TaggedUnion>::NAME,
						discriminant,
					},
				)
			}
		}
	)* }
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Compact, Decode, DecodeAll, Encode};
	use assert_matches::assert_matches;
	use hex_literal::hex;

	#[derive(Debug, Clone, PartialEq, Eq)]
	enum Payment {
		Free,
		Fixed(u32),
		Capped { asset: Compact<u32>, limit: Compact<u128> },
	}

	impl TaggedUnion for Payment {
		const NAME: &'static str = "Payment";

		fn discriminant(&self) -> u8 {
			match self {
				Payment::Free => 0,
				Payment::Fixed(_) => 1,
				Payment::Capped { .. } => 7,
			}
		}

		fn encode_variant_to<O: Output + ?Sized>(&self, dest: &mut O) {
			match self {
				Payment::Free => {},
				Payment::Fixed(amount) => amount.encode_to(dest),
				Payment::Capped { asset, limit } => {
					asset.encode_to(dest);
					limit.encode_to(dest);
				},
			}
		}

		fn decode_variant<I: Input>(discriminant: u8, input: &mut I) -> Result<Option<Self>, Error> {
			Ok(Some(match discriminant {
				0 => Payment::Free,
				1 => Payment::Fixed(u32::decode(input)?),
				7 => Payment::Capped { asset: Decode::decode(input)?, limit: Decode::decode(input)? },
				_ => return Ok(None),
			}))
		}
	}

	crate::impl_tagged_union_codec!(Payment);

	#[derive(codec::Encode)]
	enum ReferencePayment {
		#[codec(index = 0)]
		Free,
		#[codec(index = 1)]
		Fixed(u32),
		#[codec(index = 7)]
		Capped {
			#[codec(compact)]
			asset: u32,
			#[codec(compact)]
			limit: u128,
		},
	}

	#[test]
	fn discriminant_precedes_payload() {
		assert_eq!(Payment::Free.encode(), vec![0x00]);
		assert_eq!(Payment::Fixed(5).encode(), hex!("0105000000").to_vec());
		assert_eq!(
			Payment::Capped { asset: Compact(1), limit: Compact(64) }.encode(),
			hex!("07040101").to_vec()
		);
	}

	#[test]
	fn matches_reference_codec() {
		let pairs = [
			(Payment::Free, ReferencePayment::Free),
			(Payment::Fixed(u32::MAX), ReferencePayment::Fixed(u32::MAX)),
			(
				Payment::Capped { asset: Compact(16384), limit: Compact(u128::MAX) },
				ReferencePayment::Capped { asset: 16384, limit: u128::MAX },
			),
		];
		for (ours, reference) in pairs {
			assert_eq!(ours.encode(), codec::Encode::encode(&reference));
		}
	}

	#[test]
	fn round_trip() {
		for payment in [
			Payment::Free,
			Payment::Fixed(42),
			Payment::Capped { asset: Compact(9), limit: Compact(1 << 100) },
		] {
			let encoded = payment.encode();
			assert_eq!(Payment::decode_all(&mut &encoded[..]), Ok(payment));
		}
	}

	#[test]
	fn unknown_discriminant_is_rejected_by_default() {
		assert_matches!(
			Payment::decode(&mut &hex!("0305")[..]),
			Err(Error::UnknownVariant { union: "Payment", discriminant: 0x03 })
		);
		assert_matches!(
			decode_union::<Payment, _>(&mut &hex!("03")[..], UnknownVariantPolicy::default()),
			Err(Error::UnknownVariant { discriminant: 0x03, .. })
		);
	}

	#[test]
	fn unknown_discriminant_can_be_skipped() {
		let data = hex!("0305");
		let mut input = &data[..];
		assert_eq!(decode_union::<Payment, _>(&mut input, UnknownVariantPolicy::Skip), Ok(None));
		// Only the discriminant was consumed.
		assert_eq!(input, &[0x05]);
	}

	#[test]
	fn optional_union_with_policy() {
		let absent = hex!("00");
		let known = hex!("010105000000");
		let unknown = hex!("0109");

		for policy in [UnknownVariantPolicy::Reject, UnknownVariantPolicy::Skip] {
			assert_eq!(Option::<Payment>::decode_with_policy(&mut &absent[..], policy), Ok(None));
			assert_eq!(
				Option::<Payment>::decode_with_policy(&mut &known[..], policy),
				Ok(Some(Payment::Fixed(5)))
			);
		}
		assert_matches!(
			Option::<Payment>::decode_with_policy(&mut &unknown[..], UnknownVariantPolicy::Reject),
			Err(Error::UnknownVariant { discriminant: 0x09, .. })
		);
		assert_eq!(
			Option::<Payment>::decode_with_policy(&mut &unknown[..], UnknownVariantPolicy::Skip),
			Ok(None)
		);
	}

	#[test]
	fn truncated_payload_fails() {
		assert_matches!(
			Payment::decode(&mut &hex!("0105")[..]),
			Err(Error::UnexpectedEndOfInput { needed: 4, remaining: 1 })
		);
		assert_matches!(
			Payment::decode(&mut &[0u8; 0][..]),
			Err(Error::UnexpectedEndOfInput { needed: 1, remaining: 0 })
		);
	}
}
