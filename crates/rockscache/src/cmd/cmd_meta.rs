/// Command metadata containing immutable information about a command
#[derive(Debug, Clone, Default)]
pub struct CmdMeta {
	pub name: String,
	pub arity: i16,
}

impl CmdMeta {
	pub fn new(name: &str, arity: i16) -> Self {
		Self {
			name: name.to_string(),
			arity,
		}
	}

	/// Validate argument count (including the command name) against arity
	/// - Positive arity: requires exact match
	/// - Negative arity: requires at least abs(arity) arguments
	pub fn validate_arity(&self, arg_count: usize) -> Result<(), String> {
		let ok = match self.arity {
			n if n > 0 => arg_count == n as usize,
			n if n < 0 => arg_count >= n.unsigned_abs() as usize,
			// arity == 0 means any number of arguments is allowed
			_ => true,
		};
		if ok {
			Ok(())
		} else {
			Err(self.wrong_arity())
		}
	}

	pub fn wrong_arity(&self) -> String {
		format!(
			"ERR wrong number of arguments for '{}' command",
			self.name.to_lowercase()
		)
	}
}

#[cfg(test)]
mod tests {
	use rstest::rstest;

	use super::*;

	#[rstest]
	#[case(2, 2, true)]
	#[case(2, 1, false)]
	#[case(2, 3, false)]
	#[case(-2, 2, true)]
	#[case(-2, 5, true)]
	#[case(-2, 1, false)]
	#[case(-1, 1, true)]
	#[case(0, 0, true)]
	#[case(0, 9, true)]
	fn test_validate_arity(#[case] arity: i16, #[case] count: usize, #[case] ok: bool) {
		let meta = CmdMeta::new("GET", arity);
		assert_eq!(meta.validate_arity(count).is_ok(), ok);
	}

	#[test]
	fn test_wrong_arity_message() {
		let meta = CmdMeta::new("GET", 2);
		assert_eq!(
			meta.validate_arity(3).unwrap_err(),
			"ERR wrong number of arguments for 'get' command"
		);
	}
}
