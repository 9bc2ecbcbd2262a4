use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::cmd_meta::CmdMeta;

/// Command trait - all commands must implement this
#[async_trait]
pub trait Cmd: Send + Sync {
	/// Get command metadata
	fn meta(&self) -> &CmdMeta;

	fn validate_arity(&self, arg_count: usize) -> Result<(), String> {
		self.meta().validate_arity(arg_count)
	}

	/// Run the command; `args` excludes the command name and has already
	/// passed the arity check.
	async fn do_cmd(&self, cache: &dyn Cache, args: &[Bytes]) -> RespValue;

	/// Execute the command
	async fn execute(&self, cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		if let Err(err) = self.validate_arity(args.len() + 1) {
			return RespValue::error(err);
		}

		self.do_cmd(cache, args).await
	}
}
