use async_trait::async_trait;
use bytes::Bytes;
use resp::RespValue;
use storage::Cache;

use super::Cmd;
use super::CmdMeta;

pub struct EchoCmd {
	meta: CmdMeta,
}

impl Default for EchoCmd {
	fn default() -> Self {
		Self {
			meta: CmdMeta::new("ECHO", 2),
		}
	}
}

#[async_trait]
impl Cmd for EchoCmd {
	fn meta(&self) -> &CmdMeta {
		&self.meta
	}

	async fn do_cmd(&self, _cache: &dyn Cache, args: &[Bytes]) -> RespValue {
		RespValue::bulk_string(args[0].clone())
	}
}
