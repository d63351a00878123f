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

//! Transaction mortality.
//!
//! A mortal transaction is only valid for `period` blocks starting at the block whose number is
//! congruent to `phase` modulo `period`. Both are packed into two bytes, so only periods that are
//! powers of two between [`MIN_PERIOD`] and [`MAX_PERIOD`] are representable, and for periods above
//! 4096 the phase is rounded down to a multiple of `period / 4096`.

use serde::{Deserialize, Serialize};
use tx_codec::{Decode, Encode, Error, Input, Output};

/// Block number type used by eras.
pub type Period = u64;
/// Offset of the birth block within a period.
pub type Phase = u64;

/// Shortest mortal period.
pub const MIN_PERIOD: Period = 4;
/// Longest mortal period.
pub const MAX_PERIOD: Period = 1 << 16;

/// Granularity of the phase of an era with `period`.
fn quantize_factor(period: Period) -> Phase {
	(period >> 12).max(1)
}

/// Validity window of a mortal transaction.
///
/// Only periods and phases that survive the two-byte encoding unchanged can be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "(Period, Phase)", into = "(Period, Phase)")]
pub struct MortalEra {
	period: Period,
	phase: Phase,
}

impl MortalEra {
	/// Mortal era with exactly `period` and `phase`.
	///
	/// `period` must be a power of two in `[MIN_PERIOD, MAX_PERIOD]`, and `phase` a multiple of
	/// the quantize factor below `period`. Use [`Era::mortal`] to round arbitrary values.
	pub fn new(period: Period, phase: Phase) -> Result<Self, Error> {
		if !period.is_power_of_two() || !(MIN_PERIOD..=MAX_PERIOD).contains(&period) {
			return Err(Error::InvalidValue("era period is not a power of two in [4, 65536]"))
		}
		if phase >= period {
			return Err(Error::InvalidValue("era phase is not below its period"))
		}
		if phase % quantize_factor(period) != 0 {
			return Err(Error::InvalidValue("era phase is not quantized"))
		}
		Ok(Self { period, phase })
	}

	/// Length of the validity window, in blocks.
	pub fn period(&self) -> Period {
		self.period
	}

	/// Position of the first valid block within the period.
	pub fn phase(&self) -> Phase {
		self.phase
	}
}

impl TryFrom<(Period, Phase)> for MortalEra {
	type Error = Error;

	fn try_from((period, phase): (Period, Phase)) -> Result<Self, Error> {
		Self::new(period, phase)
	}
}

impl From<MortalEra> for (Period, Phase) {
	fn from(era: MortalEra) -> Self {
		(era.period, era.phase)
	}
}

/// Longevity of a transaction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Era {
	/// Valid forever. The signature is checkpointed at the genesis block.
	#[default]
	Immortal,
	/// Valid for a window of blocks, checkpointed at the first block of the window.
	///
	/// Runtimes only keep a limited number of block hashes, so the period should not exceed
	/// that number.
	Mortal(MortalEra),
}

impl Era {
	/// Mortal era of at least `period` blocks containing block `current`.
	///
	/// `period` is rounded up to a power of two and clamped to `[MIN_PERIOD, MAX_PERIOD]`. The
	/// phase is `current` modulo the period, rounded down to the quantize factor.
	pub fn mortal(period: u64, current: u64) -> Self {
		let period = period
			.checked_next_power_of_two()
			.unwrap_or(MAX_PERIOD)
			.clamp(MIN_PERIOD, MAX_PERIOD);
		let quantize_factor = quantize_factor(period);
		let phase = current % period / quantize_factor * quantize_factor;

		Self::Mortal(MortalEra { period, phase })
	}

	/// Era that never ends.
	pub fn immortal() -> Self {
		Self::Immortal
	}

	/// `true` for [`Era::Immortal`].
	pub fn is_immortal(&self) -> bool {
		matches!(self, Self::Immortal)
	}

	/// First block of the window that `current` falls in.
	///
	/// Never below `phase`, even when `current` is.
	pub fn birth(self, current: u64) -> u64 {
		match self {
			Self::Immortal => 0,
			Self::Mortal(MortalEra { period, phase }) =>
				(current.max(phase) - phase) / period * period + phase,
		}
	}

	/// First block after the window that `current` falls in.
	pub fn death(self, current: u64) -> u64 {
		match self {
			Self::Immortal => u64::MAX,
			Self::Mortal(era) => self.birth(current) + era.period,
		}
	}
}

impl From<MortalEra> for Era {
	fn from(era: MortalEra) -> Self {
		Self::Mortal(era)
	}
}

impl Encode for Era {
	fn size_hint(&self) -> usize {
		match self {
			Self::Immortal => 1,
			Self::Mortal(_) => 2,
		}
	}

	fn encode_to<O: Output + ?Sized>(&self, dest: &mut O) {
		match self {
			Self::Immortal => dest.push_byte(0),
			Self::Mortal(MortalEra { period, phase }) => {
				// Low nibble: log2(period) - 1. High 12 bits: quantized phase.
				let encoded = (period.trailing_zeros() - 1) as u16 |
					((phase / quantize_factor(*period)) << 4) as u16;
				encoded.encode_to(dest);
			},
		}
	}
}

impl Decode for Era {
	fn decode<I: Input>(input: &mut I) -> Result<Self, Error> {
		let first = input.read_byte()?;
		if first == 0 {
			return Ok(Self::Immortal)
		}
		let encoded = first as u64 | (input.read_byte()? as u64) << 8;
		let period = 2 << (encoded % (1 << 4));
		let phase = (encoded >> 4) * quantize_factor(period);
		MortalEra::new(period, phase).map(Self::Mortal)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use assert_matches::assert_matches;
	use tx_codec::DecodeAll;

	fn mortal(period: Period, phase: Phase) -> Era {
		Era::Mortal(MortalEra::new(period, phase).unwrap())
	}

	#[test]
	fn immortal_is_one_zero_byte() {
		let era = Era::immortal();
		assert!(era.is_immortal());
		for current in [0, 1, u64::MAX] {
			assert_eq!(era.birth(current), 0);
			assert_eq!(era.death(current), u64::MAX);
		}
		assert_eq!(era.encode(), vec![0x00]);
		assert_eq!(Era::decode_all(&mut &[0x00u8][..]), Ok(era));
	}

	#[test]
	fn short_period_vector() {
		let era = Era::mortal(64, 42);
		assert!(!era.is_immortal());
		// log2(64) - 1 = 5 in the low nibble, phase 42 above it.
		let expected = vec![0xa5, 0x02];
		assert_eq!(era.encode(), expected);
		assert_eq!(Era::decode_all(&mut &expected[..]), Ok(era));
	}

	#[test]
	fn long_period_vector() {
		let era = Era::mortal(32768, 20000);
		// Quantize factor 8: phase 20000 is stored as 2500.
		let expected = vec![0x4e, 0x9c];
		assert_eq!(era.encode(), expected);
		assert_eq!(Era::decode_all(&mut &expected[..]), Ok(era));
	}

	#[test]
	fn mortal_rounds_and_clamps() {
		assert_eq!(Era::mortal(64, 42), mortal(64, 42));
		assert_eq!(Era::mortal(32768, 20000), mortal(32768, 20000));
		assert_eq!(Era::mortal(200, 513), mortal(256, 1));
		assert_eq!(Era::mortal(2, 1), mortal(4, 1));
		assert_eq!(Era::mortal(4, 5), mortal(4, 1));
		assert_eq!(Era::mortal(1_000_000, 1_000_001), mortal(65536, 1_000_001 % 65536 / 16 * 16));
		assert_eq!(Era::mortal(u64::MAX, u64::MAX), mortal(65536, 65520));
	}

	#[test]
	fn validity_window() {
		let era = Era::mortal(4, 6);
		for current in 6..10 {
			assert_eq!(era.birth(current), 6);
			assert_eq!(era.death(current), 10);
		}
		assert_eq!(era.birth(10), 10);
		assert_eq!(era.birth(5), 2);
		// Blocks before the first phase do not underflow.
		assert_eq!(Era::mortal(4, 3).birth(1), 3);
	}

	#[test]
	fn unencodable_mortal_eras_can_not_be_built() {
		assert_matches!(MortalEra::new(1, 0), Err(Error::InvalidValue(_)));
		assert_matches!(MortalEra::new(2, 0), Err(Error::InvalidValue(_)));
		assert_matches!(MortalEra::new(48, 0), Err(Error::InvalidValue(_)));
		assert_matches!(MortalEra::new(64, 100), Err(Error::InvalidValue(_)));
		assert_matches!(MortalEra::new(64, 64), Err(Error::InvalidValue(_)));
		assert_matches!(MortalEra::new(1 << 20, 0), Err(Error::InvalidValue(_)));
		// Quantize factor 2 above 4096.
		assert_matches!(MortalEra::new(8192, 1), Err(Error::InvalidValue(_)));
		assert_eq!(MortalEra::new(8192, 2).map(|era| era.phase()), Ok(2));
	}

	#[test]
	fn every_buildable_era_round_trips_exactly() {
		for shift in 2..=16 {
			let period = 1u64 << shift;
			let step = quantize_factor(period);
			for phase in [0, step, period / 2, period - step] {
				let era = mortal(period, phase);
				let encoded = era.encode();
				assert_eq!(encoded.len(), era.size_hint());
				assert_eq!(Era::decode_all(&mut &encoded[..]), Ok(era));
			}
		}
	}

	#[test]
	fn inconsistent_encoding_is_rejected() {
		// Period 2 is below the minimum.
		assert_matches!(Era::decode(&mut &[0x10u8, 0x00][..]), Err(Error::InvalidValue(_)));
		// Phase 16 in a period of 16.
		assert_matches!(Era::decode(&mut &[0x03u8, 0x01][..]), Err(Error::InvalidValue(_)));
		assert_matches!(Era::decode(&mut &[0x05u8][..]), Err(Error::UnexpectedEndOfInput { .. }));
	}

	#[test]
	fn serde_representation() {
		assert_eq!(serde_json::to_string(&Era::Immortal).unwrap(), "\"immortal\"");
		assert_eq!(serde_json::to_string(&mortal(64, 42)).unwrap(), "{\"mortal\":[64,42]}");
		assert_eq!(serde_json::from_str::<Era>("{\"mortal\":[64,42]}").unwrap(), mortal(64, 42));
		assert!(serde_json::from_str::<Era>("{\"mortal\":[64,100]}").is_err());
		assert!(serde_json::from_str::<Era>("{\"mortal\":[1,0]}").is_err());
	}
}
