//! End-of-run report rendering.

use std::io::{self, Write};

use crate::store::{MAX_INSTR_LEN, StatsStore};

/// Render the final statistics.
///
/// Layout is line-oriented and stable: store total, dense instruction
/// length table (zero counts included), sparse page-offset table
/// (nonzero entries only, increasing offset), exit-code line. The store
/// is only read.
pub fn write_report(stats: &StatsStore, exit_code: i32, w: &mut impl Write) -> io::Result<()> {
    writeln!(w)?;
    writeln!(w, "Executed:")?;
    writeln!(w, "\tguest store instrs:  {}", stats.store_total())?;
    writeln!(w)?;

    writeln!(w, "\tInstr len:")?;
    for len in 1..MAX_INSTR_LEN {
        writeln!(
            w,
            "\t\tlen: {len:2}  |  n: {}",
            stats.instr_len_count(len)
        )?;
    }

    writeln!(w)?;
    writeln!(w, "\tmem stores:")?;
    for (offset, count) in stats.nonzero_offsets() {
        writeln!(w, "\t\taddr % page_size: {offset:4}  | n: {count}")?;
    }

    writeln!(w, "Exit code:       {exit_code}")
}
