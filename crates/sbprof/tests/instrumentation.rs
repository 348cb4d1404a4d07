//! End-to-end tests: build a guest block, instrument it, execute it,
//! check the statistics store and the report.

use sbprof::{BlockBuilder, Executor, Expr, PAGE_SIZE, Tool, W64, write_report};

#[test]
fn test_lengths_only_block() {
    // Instructions of lengths [4, 4, 6], no stores, one exit at the end.
    let block = BlockBuilder::<W64>::new(0x1000)
        .instr(4)
        .instr(4)
        .instr(6)
        .exit(Expr::imm(1), 0x2000)
        .build_fall();

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();
    exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();

    let stats = tool.stats();
    assert_eq!(stats.instr_len_count(4), 2);
    assert_eq!(stats.instr_len_count(6), 1);
    assert_eq!(stats.store_total(), 0);
    assert_eq!(stats.nonzero_offsets().count(), 0);
}

#[test]
fn test_stores_fold_to_same_page_offset() {
    // Lengths [2, 3]; two stores at the same offset on different pages;
    // terminal exit only, so the tally flushes once at block end.
    let page = PAGE_SIZE as u64;
    let block = BlockBuilder::<W64>::new(0x1000)
        .instr(2)
        .store(Expr::imm(page * 3 + 10), Expr::imm(1), 8)
        .instr(3)
        .store(Expr::imm(page * 7 + 10), Expr::imm(2), 8)
        .build_fall();

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();
    exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();

    let stats = tool.stats();
    assert_eq!(stats.mem_access_count(10), 2);
    assert_eq!(stats.store_total(), 2);
    assert_eq!(stats.instr_len_count(2), 1);
    assert_eq!(stats.instr_len_count(3), 1);
}

fn mid_exit_block(cond: Expr<W64>) -> sbprof::Block<W64> {
    // [len 4 with store] [len 4] exit [len 2 with store]
    BlockBuilder::<W64>::new(0x1000)
        .instr(4)
        .store(Expr::imm(0x8000), Expr::imm(1), 8)
        .instr(4)
        .exit(cond, 0x2000)
        .instr(2)
        .store(Expr::imm(0x9000), Expr::imm(2), 8)
        .build_fall()
}

#[test]
fn test_mid_block_exit_fallthrough_partitions_stores() {
    let block = mid_exit_block(Expr::imm(0));

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();
    let outcome = exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();

    // Fell through the exit: one flush of 1 at the exit, one of 1 at the
    // end. Total unaffected by flush granularity.
    assert_eq!(outcome, sbprof::Outcome::Next(0x100a));
    assert_eq!(tool.stats().store_total(), 2);
    assert_eq!(tool.stats().instr_total(), 3);
}

#[test]
fn test_mid_block_exit_taken_counts_only_executed_stores() {
    let block = mid_exit_block(Expr::imm(1));

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();
    let outcome = exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();

    // Exit taken: the trailing store never ran and must not be counted.
    assert_eq!(outcome, sbprof::Outcome::SideExit(0x2000));
    assert_eq!(tool.stats().store_total(), 1);
    assert_eq!(tool.stats().instr_total(), 2);
}

#[test]
fn test_histogram_totals_match_execution_counts() {
    let block = BlockBuilder::<W64>::new(0x1000)
        .instr(4)
        .store(Expr::imm(0x8004), Expr::imm(1), 8)
        .instr(2)
        .build_fall();

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();

    let runs = 50;
    for _ in 0..runs {
        exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();
    }

    let stats = tool.stats();
    assert_eq!(stats.instr_total(), 2 * runs);
    assert_eq!(stats.mem_access_total(), runs);
    assert_eq!(stats.store_total(), runs);
    // Cached: the block was transformed exactly once.
    assert_eq!(tool.blocks_instrumented(), 1);
}

#[test]
fn test_report_reflects_executed_block() {
    let block = BlockBuilder::<W64>::new(0x1000)
        .instr(4)
        .store(Expr::imm(0x8123), Expr::imm(7), 8)
        .build_fall();

    let mut tool = Tool::new();
    let instrumented = tool.instrument(0x1000, &block);
    let mut exec = Executor::new();
    exec.run_block(&instrumented, tool.ctx_ptr()).unwrap();

    let mut out = Vec::new();
    write_report(tool.stats(), 0, &mut out).unwrap();
    let report = String::from_utf8(out).unwrap();

    assert!(report.contains("guest store instrs:  1"));
    assert!(report.contains("len:  4  |  n: 1"));
    // 0x8123 % 4096 == 0x123 == 291
    assert!(report.contains("addr % page_size:  291  | n: 1"));
    assert!(report.contains("Exit code:       0"));
}
