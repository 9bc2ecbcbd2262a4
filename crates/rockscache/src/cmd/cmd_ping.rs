use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::Cmd;
use super::CmdMeta;

/// PING command implementation
pub struct PingCmd {
	meta: CmdMeta,
}

impl Default for PingCmd {
	fn default() -> Self {
		Self {
			// Allow 0 or 1 argument
			meta: CmdMeta::new("PING", -1),
		}
	}
}

#[async_trait]
impl Cmd for PingCmd {
	fn meta(&self) -> &CmdMeta {
		&self.meta
	}

	async fn do_cmd(&self, _cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		match args {
			[] => RespValue::simple_string("PONG"),
			[message] => RespValue::bulk_string(message.clone()),
			_ => RespValue::error(self.meta.wrong_arity()),
		}
	}
}
