//! langswitch 命令行入口
//!
//! 把翻译管线跑在文件上：`extract` 提取字符串、`apply` 写回译文、
//! `diff` 对齐两份渲染推导映射、`payload` 生成客户端引导数据。

use std::fs;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use langswitch::core::{diff_documents, extract_document, translate_document, TranslateOptions};
use langswitch::translation::registry::LanguageRegistry;
use langswitch::translation::sync::BootstrapPayload;
use langswitch::translation::{TranslationMap, TranslationResult};

#[derive(Parser)]
#[command(name = "langswitch", version, about = "Per-string HTML translation tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// 从 HTML 文件提取可翻译字符串，输出 JSON 记录
    Extract {
        /// 输入 HTML 文件
        input: PathBuf,
        /// 输出文件；缺省写到标准输出
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// 文档字符集
        #[arg(long)]
        encoding: Option<String>,
    },
    /// 对 HTML 文件应用翻译映射
    Apply {
        /// 输入 HTML 文件
        input: PathBuf,
        /// 翻译映射 JSON 文件（规范化键 → 译文）
        #[arg(short, long)]
        map: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        encoding: Option<String>,
    },
    /// 对齐基线渲染与译文渲染，推导翻译映射
    Diff {
        /// 基线语言的 HTML 文件
        baseline: PathBuf,
        /// 译文语言的 HTML 文件
        translated: PathBuf,
        /// 基线语言代码
        #[arg(long, default_value = "en")]
        base_lang: String,
        /// 译文语言代码
        #[arg(long, default_value = "es")]
        lang: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        encoding: Option<String>,
    },
    /// 用翻译映射和语言列表生成客户端引导数据
    Payload {
        /// 翻译映射 JSON 文件
        #[arg(short, long)]
        map: PathBuf,
        /// 语言列表文件，每行 `code | Label`；缺省用内置 en/es
        #[arg(long)]
        languages: Option<PathBuf>,
        /// 默认语言代码
        #[arg(long, default_value = "en")]
        default_lang: String,
        /// 映射所属的语言代码
        #[arg(long, default_value = "es")]
        lang: String,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    tracing_subscriber::fmt::init();

    if let Err(err) = run(Cli::parse()) {
        eprintln!("langswitch: {err}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> TranslationResult<()> {
    match cli.command {
        Command::Extract {
            input,
            output,
            encoding,
        } => {
            let data = fs::read(input)?;
            let options = TranslateOptions { encoding };
            let strings = extract_document(&data, &options);
            write_output(output, serde_json::to_string_pretty(&strings)?.into_bytes())
        }
        Command::Apply {
            input,
            map,
            output,
            encoding,
        } => {
            let data = fs::read(input)?;
            let map: TranslationMap = serde_json::from_str(&fs::read_to_string(map)?)?;
            let options = TranslateOptions { encoding };
            write_output(output, translate_document(&data, &options, &map))
        }
        Command::Diff {
            baseline,
            translated,
            base_lang,
            lang,
            output,
            encoding,
        } => {
            let baseline = fs::read(baseline)?;
            let translated = fs::read(translated)?;
            let options = TranslateOptions { encoding };
            let map = diff_documents(&baseline, &translated, &options, &base_lang, &lang);
            write_output(output, serde_json::to_string_pretty(&map)?.into_bytes())
        }
        Command::Payload {
            map,
            languages,
            default_lang,
            lang,
            output,
        } => {
            let map: TranslationMap = serde_json::from_str(&fs::read_to_string(map)?)?;
            let registry = match languages {
                Some(path) => {
                    LanguageRegistry::from_lines(&default_lang, &fs::read_to_string(path)?)
                }
                None => LanguageRegistry::default(),
            };
            let payload = BootstrapPayload::new(&registry, &lang, map);
            write_output(output, serde_json::to_string_pretty(&payload)?.into_bytes())
        }
    }
}

fn write_output(output: Option<PathBuf>, data: Vec<u8>) -> TranslationResult<()> {
    match output {
        Some(path) => fs::write(path, data)?,
        None => {
            use std::io::Write;
            std::io::stdout().write_all(&data)?;
        }
    }
    Ok(())
}
