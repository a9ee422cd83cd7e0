//! C ABI over [`wordpipe`], for batteries written in C.
//!
//! Two calling styles are offered. The handle functions pass the decoder
//! state explicitly:
//!
//! ```c
//! WordPipe *pipe = wordpipe_open_stdin(0);
//! uint32_t word = wordpipe_next(pipe);
//! wordpipe_close(pipe);
//! ```
//!
//! TestU01's `unif01_CreateExternGenBits` only accepts a bare
//! `unsigned int (*)(void)` with no user data, so the second style installs a
//! source in a thread-local slot and exposes [`wordpipe_stdin_gen`] to read
//! from it:
//!
//! ```c
//! wordpipe_install_stdin(0);
//! unif01_Gen *gen = unif01_CreateExternGenBits("stdin", wordpipe_stdin_gen);
//! bbattery_Crush(gen);
//! unif01_DeleteExternGenBits(gen);
//! wordpipe_uninstall();
//! ```
//!
//! The slot belongs to the installing thread; other threads see an empty
//! slot and get the sentinel.
//!
//! No entry point panics, so nothing unwinds into C.

mod pipe;

use std::cell::RefCell;
use std::ffi::{c_int, c_uint};
use std::io;
use std::ptr;

use tracing::warn;
use wordpipe::SENTINEL;

pub use pipe::WordPipe;

thread_local! {
    static INSTALLED: RefCell<Option<WordPipe>> = const { RefCell::new(None) };
}

/// Installs `pipe` as this thread's source for [`wordpipe_stdin_gen`] and
/// returns the one it replaces.
pub fn install(pipe: WordPipe) -> Option<WordPipe> {
    INSTALLED
        .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut slot| slot.replace(pipe)))
        .ok()
        .flatten()
}

/// Removes this thread's installed source, if any.
pub fn uninstall() -> Option<WordPipe> {
    INSTALLED
        .try_with(|slot| slot.try_borrow_mut().ok().and_then(|mut slot| slot.take()))
        .ok()
        .flatten()
}

/// Opens a decoder over standard input.
///
/// `capacity` is the buffer size in bytes; `0` selects the default of 8192.
/// Returns NULL if the capacity is not a multiple of 4. Release the handle
/// with [`wordpipe_close`].
///
/// The standard-input lock is taken per read, not held by the handle, so
/// several handles and an installed source can coexist on one thread.
#[unsafe(no_mangle)]
pub extern "C" fn wordpipe_open_stdin(capacity: usize) -> *mut WordPipe {
    match WordPipe::open(io::stdin(), capacity) {
        Ok(pipe) => pipe.into_raw(),
        Err(err) => {
            warn!(%err, "wordpipe_open_stdin rejected its capacity");
            ptr::null_mut()
        }
    }
}

/// Decodes the next word from `pipe`.
///
/// Returns `0` once the stream has ended, and for a NULL handle.
///
/// # Safety
///
/// `pipe` must be NULL or a live handle from [`wordpipe_open_stdin`] that no
/// other thread is using.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wordpipe_next(pipe: *mut WordPipe) -> u32 {
    // SAFETY: the caller guarantees the handle is live and unshared.
    match unsafe { pipe.as_mut() } {
        Some(pipe) => pipe.next_word(),
        None => SENTINEL,
    }
}

/// Returns 1 once `pipe` has run out of stream data, 0 otherwise.
///
/// A NULL handle counts as exhausted.
///
/// # Safety
///
/// `pipe` must be NULL or a live handle from [`wordpipe_open_stdin`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wordpipe_is_exhausted(pipe: *const WordPipe) -> c_int {
    // SAFETY: the caller guarantees the handle is live.
    match unsafe { pipe.as_ref() } {
        Some(pipe) => c_int::from(pipe.is_exhausted()),
        None => 1,
    }
}

/// Releases a handle. NULL is ignored.
///
/// # Safety
///
/// `pipe` must be NULL or a live handle from [`wordpipe_open_stdin`]; it must
/// not be used again afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn wordpipe_close(pipe: *mut WordPipe) {
    if !pipe.is_null() {
        // SAFETY: the handle came from `Box::into_raw` and is released once.
        drop(unsafe { WordPipe::from_raw(pipe) });
    }
}

/// Installs a standard-input decoder for [`wordpipe_stdin_gen`] on the
/// calling thread, replacing any previous one.
///
/// `capacity` follows [`wordpipe_open_stdin`]. Returns 0 on success and -1
/// if the capacity is invalid, in which case nothing changes.
#[unsafe(no_mangle)]
pub extern "C" fn wordpipe_install_stdin(capacity: usize) -> c_int {
    match WordPipe::open(io::stdin(), capacity) {
        Ok(pipe) => {
            install(pipe);
            0
        }
        Err(err) => {
            warn!(%err, "wordpipe_install_stdin rejected its capacity");
            -1
        }
    }
}

/// The next word from this thread's installed source, or `0` if none is
/// installed or its stream has ended.
///
/// Pass this function to `unif01_CreateExternGenBits`.
#[unsafe(no_mangle)]
pub extern "C" fn wordpipe_stdin_gen() -> c_uint {
    INSTALLED
        .try_with(|slot| match slot.try_borrow_mut() {
            Ok(mut slot) => slot.as_mut().map_or(SENTINEL, WordPipe::next_word),
            Err(_) => SENTINEL,
        })
        .unwrap_or(SENTINEL)
}

/// Drops this thread's installed source. Safe to call when none is installed.
#[unsafe(no_mangle)]
pub extern "C" fn wordpipe_uninstall() {
    drop(uninstall());
}
