use std::collections::HashMap;
use std::sync::Arc;

use super::Cmd;
use super::DelCmd;
use super::EchoCmd;
use super::GetCmd;
use super::PingCmd;
use super::SetCmd;

pub struct CmdTable {
	inner: HashMap<String, Arc<dyn Cmd>>,
}

impl Default for CmdTable {
	fn default() -> Self {
		Self::new()
	}
}

impl CmdTable {
	pub fn new() -> Self {
		let mut table = Self {
			inner: HashMap::new(),
		};
		// connection cmd
		table.register(PingCmd::default());
		table.register(EchoCmd::default());
		// string type cmd
		table.register(SetCmd::default());
		table.register(GetCmd::default());
		table.register(DelCmd::default());
		table
	}

	/// Add a command under its upper-cased metadata name.
	pub fn register(&mut self, cmd: impl Cmd + 'static) {
		let name = cmd.meta().name.to_uppercase();
		self.inner.insert(name, Arc::new(cmd));
	}

	/// Look up a command by its upper-cased name.
	pub fn get_cmd(&self, name: &str) -> Option<&Arc<dyn Cmd>> {
		self.inner.get(name)
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}
}
