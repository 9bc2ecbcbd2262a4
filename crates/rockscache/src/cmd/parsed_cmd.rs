use bytes::Bytes;
use resp::RespValue;
use thiserror::Error;

/// Why a decoded frame could not be turned into a command.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidCommand {
	#[error("expected array, got {0}")]
	NotAnArray(&'static str),
	#[error("empty command")]
	Empty,
	#[error("invalid command name")]
	InvalidName,
	#[error("invalid argument at position {0}")]
	InvalidArgument(usize),
}

/// A request split into its upper-cased name and raw arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCmd {
	pub name: String,
	pub args: Vec<Bytes>,
}

impl TryFrom<RespValue> for ParsedCmd {
	type Error = InvalidCommand;

	fn try_from(value: RespValue) -> Result<Self, Self::Error> {
		let kind = value.kind();
		let mut items = value
			.into_vec()
			.ok_or(InvalidCommand::NotAnArray(kind))?
			.into_iter();

		// First element is the command name
		let name = items
			.next()
			.ok_or(InvalidCommand::Empty)?
			.as_str()
			.ok_or(InvalidCommand::InvalidName)?
			.to_uppercase();

		// Remaining elements are arguments
		let args = items
			.enumerate()
			.map(|(i, v)| match v {
				RespValue::BulkString(b) | RespValue::SimpleString(b) => Ok(b),
				_ => Err(InvalidCommand::InvalidArgument(i + 1)),
			})
			.collect::<Result<Vec<_>, _>>()?;

		Ok(ParsedCmd { name, args })
	}
}
