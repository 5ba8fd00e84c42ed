use log::debug;

use crate::FrequencyTable;

/// Add the byte counts of `data` to `table`.
///
/// If any count would pass u16::MAX, every increment made by this call is undone and the table is
/// left exactly as it was before the call. Counts added by earlier calls stay. Returns false when
/// the call was rolled back.
pub fn tabulate(table: &mut FrequencyTable, data: &[u8]) -> bool {
    for (i, &byte) in data.iter().enumerate() {
        match table[byte as usize].checked_add(1) {
            Some(count) => table[byte as usize] = count,
            None => {
                debug!(
                    "Count for {:#04x} would overflow at byte {}, rolling back {} increments",
                    byte, i, i
                );
                data[..i]
                    .iter()
                    .for_each(|&done| table[done as usize] -= 1);
                return false;
            }
        }
    }
    true
}

/// Returns a new frequency table for the input data (all zero if it overflows).
pub fn freqs(data: &[u8]) -> FrequencyTable {
    let mut table = [0_u16; crate::TABLE_SIZE];
    tabulate(&mut table, data);
    table
}
