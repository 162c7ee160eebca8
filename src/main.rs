use std::sync::Arc;

use anyhow::{bail, Result};
use tracing::{info, warn};

use uni_result_fetch::api;
use uni_result_fetch::utils::logging;
use uni_result_fetch::{Config, LookupOutcome, ResultLookup};

const USAGE: &str = "用法: uni_result_fetch [<institute> <enrollment> <degree> <semester> <exam>]";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::from_env()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.as_slice() {
        // 无参数：启动 HTTP 服务
        [] => {
            logging::log_startup(&config, "HTTP 服务模式");
            let bind_addr = config.bind_addr.clone();
            let lookup = Arc::new(ResultLookup::new(config)?);
            api::serve(lookup, &bind_addr).await?;
        }
        // 五个参数：单次查询
        [institute, enrollment, degree, semester, exam] => {
            logging::log_startup(&config, "单次查询模式");
            let lookup = ResultLookup::new(config)?;
            let outcome = lookup
                .lookup_result(institute, enrollment, degree, semester, exam)
                .await;
            print_outcome(&outcome);
            if !outcome.is_success() {
                std::process::exit(1);
            }
        }
        _ => bail!("{}", USAGE),
    }

    Ok(())
}

/// 打印查询结果
fn print_outcome(outcome: &LookupOutcome) {
    match outcome {
        LookupOutcome::Success(sheet) => {
            info!("✅ 找到成绩");
            if let Ok(info) = serde_json::to_string_pretty(&sheet.student_info) {
                println!("{}", info);
            }
            println!();
            for line in sheet.results.to_lines() {
                println!("{}", line);
            }
        }
        LookupOutcome::Failure(failure) => {
            warn!("❌ 查询失败 ({:?})", failure.kind);
            println!("❌ {}", failure.message);
        }
    }
}
