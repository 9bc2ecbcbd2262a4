use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::Cmd;
use super::CmdMeta;

pub struct DelCmd {
	meta: CmdMeta,
}

impl Default for DelCmd {
	fn default() -> Self {
		Self {
			// At least 1 key
			meta: CmdMeta::new("DEL", -2),
		}
	}
}

#[async_trait]
impl Cmd for DelCmd {
	fn meta(&self) -> &CmdMeta {
		&self.meta
	}

	async fn do_cmd(&self, cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		let mut count = 0;
		for key in args {
			match cache.del(key).await {
				Ok(true) => count += 1,
				Ok(false) => {}
				Err(e) => return RespValue::error(format!("ERR {}", e)),
			}
		}
		RespValue::Integer(count)
	}
}
