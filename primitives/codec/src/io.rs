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

//! Byte cursors the codec reads from and writes to.
//!
//! There is no process-wide encoder or decoder. Every function takes the cursor it works on.

use crate::Error;

/// Source of bytes for decoding.
pub trait Input {
	/// Number of bytes left.
	fn remaining_len(&self) -> usize;

	/// Fill `into` with the next `into.len()` bytes.
	///
	/// Fails with [`Error::UnexpectedEndOfInput`] without consuming anything if fewer bytes
	/// remain.
	fn read(&mut self, into: &mut [u8]) -> Result<(), Error>;

	/// Read a single byte.
	fn read_byte(&mut self) -> Result<u8, Error> {
		let mut buf = [0u8; 1];
		self.read(&mut buf)?;
		Ok(buf[0])
	}
}

impl Input for &[u8] {
	fn remaining_len(&self) -> usize {
		self.len()
	}

	fn read(&mut self, into: &mut [u8]) -> Result<(), Error> {
		if into.len() > self.len() {
			return Err(Error::UnexpectedEndOfInput { needed: into.len(), remaining: self.len() })
		}
		let (head, tail) = self.split_at(into.len());
		into.copy_from_slice(head);
		*self = tail;
		Ok(())
	}
}

/// Sink for encoded bytes.
pub trait Output {
	/// Append `bytes`.
	fn write(&mut self, bytes: &[u8]);

	/// Append a single byte.
	fn push_byte(&mut self, byte: u8) {
		self.write(&[byte]);
	}
}

impl Output for Vec<u8> {
	fn write(&mut self, bytes: &[u8]) {
		self.extend_from_slice(bytes)
	}

	fn push_byte(&mut self, byte: u8) {
		self.push(byte)
	}
}

/// An [`Output`] that only counts the bytes written to it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SizeCounter(pub usize);

impl Output for SizeCounter {
	fn write(&mut self, bytes: &[u8]) {
		self.0 += bytes.len();
	}

	fn push_byte(&mut self, _byte: u8) {
		self.0 += 1;
	}
}

/// Read one byte from `input`.
pub fn read_one_byte<I: Input + ?Sized>(input: &mut I) -> Result<u8, Error> {
	input.read_byte()
}

/// Write one byte to `dest`.
pub fn push_byte<O: Output + ?Sized>(dest: &mut O, byte: u8) {
	dest.push_byte(byte)
}
