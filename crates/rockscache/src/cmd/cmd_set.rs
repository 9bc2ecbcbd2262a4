use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::Cmd;
use super::CmdMeta;

/// SET command implementation
pub struct SetCmd {
	meta: CmdMeta,
}

impl Default for SetCmd {
	fn default() -> Self {
		Self {
			meta: CmdMeta::new("SET", 3),
		}
	}
}

#[async_trait]
impl Cmd for SetCmd {
	fn meta(&self) -> &CmdMeta {
		&self.meta
	}

	async fn do_cmd(&self, cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		let key = args[0].clone();
		let value = args[1].clone();

		match cache.set(key, value).await {
			Ok(()) => RespValue::simple_string("OK"),
			Err(e) => RespValue::error(format!("ERR {}", e)),
		}
	}
}
