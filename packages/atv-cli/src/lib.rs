use clap::builder::{
	Styles,
	styling::{AnsiColor, Effects},
};

/// `<package>-<version>` of the crate invoking the macro.
#[macro_export]
macro_rules! version {
	() => {
		concat!(env!("CARGO_PKG_NAME"), "-", env!("CARGO_PKG_VERSION"))
	};
}

pub fn styles() -> Styles {
	Styles::styled()
		.header(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.usage(AnsiColor::Cyan.on_default() | Effects::BOLD)
		.literal(AnsiColor::Blue.on_default() | Effects::BOLD)
		.placeholder(AnsiColor::Green.on_default())
		.error(AnsiColor::Red.on_default() | Effects::BOLD)
}
