mod decode;
#[cfg(feature = "rand")]
mod rand_support;
mod refill;
