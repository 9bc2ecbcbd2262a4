pub const LOGO: &str = r#"
 ___  ___   ___ _  _____  ___   _   ___ _  _ ___
| _ \/ _ \ / __| |/ / __|/ __| /_\ / __| || | __|
|   / (_) | (__| ' <\__ \ (__ / _ \ (__| __ | _|
|_|_\\___/ \___|_|\_\___/\___/_/ \_\___|_||_|___|
"#;

/// Print the banner with the version and the address being served.
pub fn show_logo(addr: &str) {
	let now = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();

	let info = format!(
		r#"Version:     v{}
Listening:   {}
Started:     {}"#,
		env!("CARGO_PKG_VERSION"),
		addr,
		now
	);

	println!("{}\n{}\n", LOGO.trim_end(), info);
}
