//filepathbar/src/main.rs
use lsp_server::Connection;

mod logging;

use filepathbar::kernel::services::adapters::serve;

fn main() -> anyhow::Result<()> {
    // stdout 是协议通道，日志只写文件
    let _logging = logging::init();

    let (connection, io_threads) = Connection::stdio();
    serve(connection)?;
    io_threads.join()?;

    tracing::info!("plugin exited");
    Ok(())
}
