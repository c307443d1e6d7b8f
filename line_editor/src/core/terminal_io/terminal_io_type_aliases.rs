// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

use std::sync::Arc;

use smallstr::SmallString;
use smallvec::SmallVec;

/// Disambiguate the type of `StdMutex` from stdlib and tokio to avoid conflicts.
pub type StdMutex<T> = std::sync::Mutex<T>;

/// Type alias for a `Send`-able output device (raw terminal, mock, etc).
pub type SendRawTerminal = dyn std::io::Write + Send;
/// Type alias for a `Send`-able raw terminal wrapped in an `Arc<StdMutex>`.
pub type SafeRawTerminal = Arc<StdMutex<SendRawTerminal>>;

pub const INLINE_VEC_SIZE: usize = 8;
/// Stack allocated for up to [`INLINE_VEC_SIZE`] items, then spills to the heap.
pub type InlineVec<T> = SmallVec<[T; INLINE_VEC_SIZE]>;

pub const DEFAULT_STRING_STORAGE_SIZE: usize = 16;
/// Stack allocated string for short text like a single grapheme or a prompt label.
pub type InlineString = SmallString<[u8; DEFAULT_STRING_STORAGE_SIZE]>;
