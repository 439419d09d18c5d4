//! Image-loader tests.

use std::io::Write;

use mtsim_core::config::SimConfig;
use mtsim_core::isa::{Opcode, Operand};
use mtsim_core::sim::loader::{self, LoadError};

use crate::common::builder;

const WELL_FORMED: &str = "
# latencies and penalty
.load_latency 2
.store_latency 3
.switch_penalty 8

.thread 0
    ADDI $1, $0, 5
    LOAD $2, $1, 0x10
    HALT

.thread 1
    STORE $1, $2, $3    # mem[r1 + r3] = r2
    NOP
    HALT

.data
    0x10 123
    32 -7
";

#[test]
fn parses_directives_and_thread_count() {
    let image = loader::parse_image(WELL_FORMED, SimConfig::default()).unwrap();
    assert_eq!(image.config.threads, 2);
    assert_eq!(image.config.load_latency, 2);
    assert_eq!(image.config.store_latency, 3);
    assert_eq!(image.config.switch_penalty, 8);
}

#[test]
fn parses_instruction_streams() {
    let image = loader::parse_image(WELL_FORMED, SimConfig::default()).unwrap();

    let t0 = image.program.stream(0).unwrap();
    assert_eq!(t0.len(), 3);
    assert_eq!(t0[0], builder::addi(1, 0, 5));
    assert_eq!(t0[1], builder::load(2, 1, 0x10));
    assert_eq!(t0[2].opcode, Opcode::Halt);

    let t1 = image.program.stream(1).unwrap();
    assert_eq!(t1[0].opcode, Opcode::Store);
    assert_eq!(t1[0].dst, 1);
    assert_eq!(t1[0].src1, 2);
    assert_eq!(t1[0].src2, Operand::Reg(3));
    assert_eq!(t1[1].opcode, Opcode::Nop);
}

#[test]
fn parses_data_section() {
    let image = loader::parse_image(WELL_FORMED, SimConfig::default()).unwrap();
    assert_eq!(image.data.get(0x10), 123);
    assert_eq!(image.data.get(32), -7);
    assert_eq!(image.data.get(0), 0);
    assert_eq!(image.data.populated_words(), 2);
}

#[test]
fn base_config_fills_unset_parameters() {
    let base = SimConfig {
        threads: 1,
        load_latency: 9,
        store_latency: 9,
        switch_penalty: 9,
    };
    let image = loader::parse_image(".thread 0\nHALT\n", base).unwrap();
    assert_eq!(image.config.threads, 1);
    assert_eq!(image.config.load_latency, 9);
    assert_eq!(image.config.store_latency, 9);
    assert_eq!(image.config.switch_penalty, 9);
}

#[test]
fn mnemonics_are_case_insensitive_and_commas_optional() {
    let image = loader::parse_image(".thread 0\nadd $1 $2 $3\nhalt\n", SimConfig::default()).unwrap();
    let t0 = image.program.stream(0).unwrap();
    assert_eq!(t0[0], builder::add(1, 2, 3));
}

#[test]
fn directive_inside_thread_section_keeps_the_stream_open() {
    let image = loader::parse_image(
        ".thread 0\nADDI $1, $0, 1\n.switch_penalty 9\nHALT\n",
        SimConfig::default(),
    )
    .unwrap();
    assert_eq!(image.program.stream(0).unwrap().len(), 2);
    assert_eq!(image.config.switch_penalty, 9);
}

#[test]
fn unknown_mnemonic_is_reported_with_its_line() {
    let err = loader::parse_image(".thread 0\nNOP\nMUL $1, $2, $3\n", SimConfig::default())
        .unwrap_err();
    match err {
        LoadError::Syntax { line, message } => {
            assert_eq!(line, 3);
            assert!(message.contains("MUL"));
        }
        other => panic!("expected a syntax error, got {other}"),
    }
}

#[test]
fn instruction_outside_a_thread_section_is_rejected() {
    let err = loader::parse_image("ADDI $1, $0, 1\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
}

#[test]
fn thread_sections_must_be_in_order() {
    let err = loader::parse_image(".thread 1\nHALT\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 1, .. }));

    let err =
        loader::parse_image(".thread 0\nHALT\n.thread 0\nHALT\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 3, .. }));
}

#[test]
fn register_out_of_range_is_rejected() {
    let err = loader::parse_image(".thread 0\nADD $8, $0, $1\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
}

#[test]
fn addi_rejects_a_register_third_operand() {
    let err = loader::parse_image(".thread 0\nADDI $1, $0, $2\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
}

#[test]
fn add_rejects_an_immediate_third_operand() {
    let err = loader::parse_image(".thread 0\nADD $1, $0, 5\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
}

#[test]
fn wrong_operand_count_is_rejected() {
    let err = loader::parse_image(".thread 0\nADD $1, $0\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));

    let err = loader::parse_image(".thread 0\nHALT $1\n", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 2, .. }));
}

#[test]
fn negative_latency_directive_is_rejected() {
    let err = loader::parse_image(".load_latency -1\n.thread 0\nHALT\n", SimConfig::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 1, .. }));
}

#[test]
fn malformed_data_line_is_rejected() {
    let err = loader::parse_image(
        ".thread 0\nHALT\n.data\n0x10 1 2\n",
        SimConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, LoadError::Syntax { line: 4, .. }));
}

#[test]
fn image_without_threads_is_rejected() {
    let err = loader::parse_image("# nothing here\n.load_latency 1\n", SimConfig::default())
        .unwrap_err();
    assert!(matches!(err, LoadError::NoThreads));
}

#[test]
fn load_image_round_trips_through_a_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(WELL_FORMED.as_bytes()).unwrap();

    let image = loader::load_image(file.path(), SimConfig::default()).unwrap();
    assert_eq!(image.config.threads, 2);
    assert_eq!(image.data.get(0x10), 123);
}

#[test]
fn missing_image_file_reports_io_error() {
    let err = loader::load_image("/nonexistent/image.img", SimConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
