pub type CmdResult<T> = lostack_migrate::Result<(T, i32)>;

pub mod migrate;
