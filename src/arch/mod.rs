#[cfg(feature = "8051")]
#[path = "8051.rs"]
pub mod _8051;

#[cfg(feature = "avr")]
pub mod avr;

#[cfg(feature = "pic")]
pub mod pic;
