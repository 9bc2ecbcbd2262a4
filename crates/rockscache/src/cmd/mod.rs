mod cmd_del;
mod cmd_echo;
mod cmd_get;
mod cmd_meta;
mod cmd_ping;
mod cmd_set;
mod cmd_trait;
mod parsed_cmd;
mod table;

pub use cmd_del::DelCmd;
pub use cmd_echo::EchoCmd;
pub use cmd_get::GetCmd;
pub use cmd_meta::CmdMeta;
pub use cmd_ping::PingCmd;
pub use cmd_set::SetCmd;
pub use cmd_trait::Cmd;
pub use parsed_cmd::InvalidCommand;
pub use parsed_cmd::ParsedCmd;
pub use table::CmdTable;
