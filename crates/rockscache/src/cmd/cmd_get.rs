use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::Cmd;
use super::CmdMeta;

/// GET command implementation
pub struct GetCmd {
	meta: CmdMeta,
}

impl Default for GetCmd {
	fn default() -> Self {
		Self {
			meta: CmdMeta::new("GET", 2),
		}
	}
}

#[async_trait]
impl Cmd for GetCmd {
	fn meta(&self) -> &CmdMeta {
		&self.meta
	}

	async fn do_cmd(&self, cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		match cache.get(&args[0]).await {
			Ok(Some(value)) => RespValue::bulk_string(value),
			Ok(None) => RespValue::NullBulkString,
			Err(e) => RespValue::error(format!("ERR {}", e)),
		}
	}
}
