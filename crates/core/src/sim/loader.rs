//! Text image loader.
//!
//! Parses the line-oriented image format that bundles everything one
//! simulation needs: machine parameters, per-thread programs, and the
//! initial data memory. The format:
//!
//! ```text
//! # memory latencies and switch penalty (optional, default elsewhere)
//! .load_latency 4
//! .store_latency 4
//! .switch_penalty 8
//!
//! .thread 0
//!     ADDI $1, $0, 5
//!     LOAD $2, $1, 0x10
//!     HALT
//!
//! .thread 1
//!     STORE $1, $2, $3      # mem[r1 + r3] = r2
//!     HALT
//!
//! .data
//!     0x10 123
//! ```
//!
//! `#` starts a comment; commas between operands are optional. Registers
//! are written `$0`..`$7`; immediates are decimal (optionally negative) or
//! `0x`-prefixed hex. Thread sections must appear in ascending order
//! starting at 0, and the thread count of the resulting configuration is
//! the number of sections.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::common::constants::REG_COUNT;
use crate::config::SimConfig;
use crate::isa::{Instruction, Opcode, Operand};
use crate::mem::{ProgramImage, SparseMemory};

/// Errors produced while loading an image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The image file could not be read.
    #[error("failed to read image '{path}': {source}")]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A line of the image did not parse.
    #[error("line {line}: {message}")]
    Syntax {
        /// 1-based line number in the image.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// The image contains no `.thread` sections.
    #[error("image declares no thread sections")]
    NoThreads,
}

/// Everything one simulation run needs, as loaded from an image.
#[derive(Debug, Clone)]
pub struct Image {
    /// Machine parameters: directives layered over the base configuration,
    /// with the thread count taken from the image's sections.
    pub config: SimConfig,
    /// Per-thread instruction streams.
    pub program: ProgramImage,
    /// Initial data memory.
    pub data: SparseMemory,
}

/// Reads and parses an image file.
///
/// # Arguments
///
/// * `path` - Image file location.
/// * `base` - Configuration the image's directives are layered over.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file cannot be read, otherwise any
/// error of [`parse_image`].
pub fn load_image(path: impl AsRef<Path>, base: SimConfig) -> Result<Image, LoadError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_image(&text, base)
}

/// Which part of the image the parser is currently inside.
#[derive(Clone, Copy)]
enum Section {
    /// Before any section header; only directives are allowed.
    Preamble,
    /// Inside `.thread N`; lines are instructions.
    Thread,
    /// Inside `.data`; lines are `address value` pairs.
    Data,
}

/// Parses image text.
///
/// # Arguments
///
/// * `text` - Image contents.
/// * `base` - Configuration the image's directives are layered over.
///
/// # Errors
///
/// Returns [`LoadError::Syntax`] (with a 1-based line number) for any
/// malformed line, or [`LoadError::NoThreads`] if no thread section is
/// declared.
pub fn parse_image(text: &str, base: SimConfig) -> Result<Image, LoadError> {
    let mut config = base;
    let mut streams: Vec<Vec<Instruction>> = Vec::new();
    let mut data = SparseMemory::new();
    let mut section = Section::Preamble;

    for (idx, raw) in text.lines().enumerate() {
        let line = idx + 1;
        let stripped = raw.split('#').next().unwrap_or("").trim();
        if stripped.is_empty() {
            continue;
        }

        let tokens: Vec<&str> = stripped
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter(|t| !t.is_empty())
            .collect();

        if let Some(directive) = tokens[0].strip_prefix('.') {
            section = apply_directive(directive, &tokens[1..], line, section, &mut config, &mut streams)?;
            continue;
        }

        match section {
            Section::Preamble => {
                return Err(syntax(
                    line,
                    "instructions must appear inside a '.thread' section",
                ));
            }
            Section::Thread => {
                let inst = parse_instruction(&tokens, line)?;
                match streams.last_mut() {
                    Some(stream) => stream.push(inst),
                    // Unreachable: Section::Thread implies a pushed stream.
                    None => return Err(syntax(line, "no open thread section")),
                }
            }
            Section::Data => parse_data_word(&tokens, line, &mut data)?,
        }
    }

    if streams.is_empty() {
        return Err(LoadError::NoThreads);
    }
    config.threads = streams.len();

    debug!(
        threads = config.threads,
        words = data.populated_words(),
        "image parsed"
    );

    Ok(Image {
        config,
        program: ProgramImage::with_streams(streams),
        data,
    })
}

fn syntax(line: usize, message: impl Into<String>) -> LoadError {
    LoadError::Syntax {
        line,
        message: message.into(),
    }
}

fn apply_directive(
    directive: &str,
    args: &[&str],
    line: usize,
    section: Section,
    config: &mut SimConfig,
    streams: &mut Vec<Vec<Instruction>>,
) -> Result<Section, LoadError> {
    match directive.to_ascii_lowercase().as_str() {
        "thread" => {
            let [arg] = args else {
                return Err(syntax(line, "'.thread' takes exactly one thread index"));
            };
            let tid = parse_int(arg, line)?;
            if tid != streams.len() as i64 {
                return Err(syntax(
                    line,
                    format!(
                        "thread sections must be declared in order: expected '.thread {}'",
                        streams.len()
                    ),
                ));
            }
            streams.push(Vec::new());
            Ok(Section::Thread)
        }
        "data" => {
            if !args.is_empty() {
                return Err(syntax(line, "'.data' takes no arguments"));
            }
            Ok(Section::Data)
        }
        "load_latency" | "store_latency" | "switch_penalty" => {
            let [arg] = args else {
                return Err(syntax(
                    line,
                    format!("'.{directive}' takes exactly one value"),
                ));
            };
            let value = parse_int(arg, line)?;
            let cycles = u64::try_from(value)
                .map_err(|_| syntax(line, format!("'.{directive}' must be non-negative")))?;
            match directive {
                "load_latency" => config.load_latency = cycles,
                "store_latency" => config.store_latency = cycles,
                _ => config.switch_penalty = cycles,
            }
            // Parameter directives don't open a section; stay where we are.
            Ok(section)
        }
        other => Err(syntax(line, format!("unknown directive '.{other}'"))),
    }
}

fn parse_instruction(tokens: &[&str], line: usize) -> Result<Instruction, LoadError> {
    let mnemonic = tokens[0].to_ascii_uppercase();
    let operands = &tokens[1..];

    let expect_count = |want: usize| -> Result<(), LoadError> {
        if operands.len() == want {
            Ok(())
        } else {
            Err(syntax(
                line,
                format!(
                    "{mnemonic} takes {want} operand(s), found {}",
                    operands.len()
                ),
            ))
        }
    };

    match mnemonic.as_str() {
        "NOP" => {
            expect_count(0)?;
            Ok(Instruction::NOP)
        }
        "HALT" => {
            expect_count(0)?;
            Ok(Instruction::HALT)
        }
        "ADD" | "SUB" => {
            expect_count(3)?;
            let src2 = parse_register(operands[2], line)?;
            Ok(Instruction {
                opcode: if mnemonic == "ADD" {
                    Opcode::Add
                } else {
                    Opcode::Sub
                },
                dst: parse_register(operands[0], line)?,
                src1: parse_register(operands[1], line)?,
                src2: Operand::Reg(src2),
            })
        }
        "ADDI" | "SUBI" => {
            expect_count(3)?;
            if operands[2].starts_with('$') {
                return Err(syntax(
                    line,
                    format!("{mnemonic} takes an immediate third operand"),
                ));
            }
            let imm = parse_imm(operands[2], line)?;
            Ok(Instruction {
                opcode: if mnemonic == "ADDI" {
                    Opcode::Addi
                } else {
                    Opcode::Subi
                },
                dst: parse_register(operands[0], line)?,
                src1: parse_register(operands[1], line)?,
                src2: Operand::Imm(imm),
            })
        }
        "LOAD" | "STORE" => {
            expect_count(3)?;
            Ok(Instruction {
                opcode: if mnemonic == "LOAD" {
                    Opcode::Load
                } else {
                    Opcode::Store
                },
                dst: parse_register(operands[0], line)?,
                src1: parse_register(operands[1], line)?,
                src2: parse_operand(operands[2], line)?,
            })
        }
        other => Err(syntax(line, format!("unknown mnemonic '{other}'"))),
    }
}

fn parse_data_word(tokens: &[&str], line: usize, data: &mut SparseMemory) -> Result<(), LoadError> {
    let [addr, value] = tokens else {
        return Err(syntax(line, "data lines are 'address value' pairs"));
    };
    let addr = parse_int(addr, line)?;
    let addr = u32::try_from(addr)
        .map_err(|_| syntax(line, "data addresses must fit an unsigned 32-bit word index"))?;
    let value = parse_imm(value, line)?;
    data.set(addr, value);
    Ok(())
}

fn parse_register(token: &str, line: usize) -> Result<usize, LoadError> {
    let Some(idx) = token.strip_prefix('$') else {
        return Err(syntax(
            line,
            format!("expected a register like '$0', found '{token}'"),
        ));
    };
    let idx: usize = idx
        .parse()
        .map_err(|_| syntax(line, format!("bad register '{token}'")))?;
    if idx >= REG_COUNT {
        return Err(syntax(
            line,
            format!("register '{token}' out of range: the file has {REG_COUNT} registers"),
        ));
    }
    Ok(idx)
}

fn parse_operand(token: &str, line: usize) -> Result<Operand, LoadError> {
    if token.starts_with('$') {
        Ok(Operand::Reg(parse_register(token, line)?))
    } else {
        Ok(Operand::Imm(parse_imm(token, line)?))
    }
}

fn parse_imm(token: &str, line: usize) -> Result<i32, LoadError> {
    let value = parse_int(token, line)?;
    i32::try_from(value)
        .map_err(|_| syntax(line, format!("immediate '{token}' does not fit 32 bits")))
}

/// Parses a decimal (optionally negative) or `0x`-prefixed hex integer.
fn parse_int(token: &str, line: usize) -> Result<i64, LoadError> {
    let parsed = if let Some(hex) = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X")) {
        i64::from_str_radix(hex, 16)
    } else {
        token.parse()
    };
    parsed.map_err(|_| syntax(line, format!("bad number '{token}'")))
}
