//! hash-password CLI 命令
//!
//! 输出的 Argon2 哈希写入 `admin.password_hash`
//! （或环境变量 `FOLIO__ADMIN__PASSWORD_HASH`）。

use std::io::{self, BufRead, IsTerminal, Write};

use colored::Colorize;

use crate::interfaces::cli::CliError;
use crate::utils::password::hash_password;

const MIN_PASSWORD_LEN: usize = 8;

/// 从不同来源获取密码
fn get_password(password: Option<String>, stdin: bool) -> Result<String, CliError> {
    if stdin {
        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    } else if let Some(pwd) = password {
        Ok(pwd)
    } else {
        prompt_password_with_confirm()
    }
}

/// 交互式输入密码（带确认）
fn prompt_password_with_confirm() -> Result<String, CliError> {
    if !io::stdin().is_terminal() {
        return Err(CliError::InputError(
            "No password provided. Use --password or --stdin flag, or run interactively."
                .to_string(),
        ));
    }

    print!("Enter admin password: ");
    io::stdout().flush()?;
    let password = rpassword::read_password()?;

    print!("Confirm password: ");
    io::stdout().flush()?;
    let confirm = rpassword::read_password()?;

    if password != confirm {
        return Err(CliError::InputError("Passwords do not match".to_string()));
    }

    Ok(password)
}

fn check_password(password: &str) -> Result<(), CliError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CliError::InputError(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LEN
        )));
    }
    Ok(())
}

/// 运行 hash-password 命令
pub fn run_hash_password(password: Option<String>, stdin: bool) -> Result<(), CliError> {
    let password = get_password(password, stdin)?;
    check_password(&password)?;

    let hashed = hash_password(&password)?;

    // 哈希单独输出到 stdout，方便脚本捕获
    println!("{}", hashed);
    eprintln!(
        "{} Set it as {} in config.toml or {}",
        "✓".green().bold(),
        "admin.password_hash".cyan(),
        "FOLIO__ADMIN__PASSWORD_HASH".cyan()
    );
    Ok(())
}
