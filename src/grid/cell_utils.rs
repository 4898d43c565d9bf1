/// Converts a column letter to a 0-based index ("A" -> 0, "Z" -> 25, "AA" -> 26)
pub fn column_to_index(column: &str) -> Option<usize> {
    if column.is_empty() {
        return None;
    }
    let mut index = 0usize;
    for ch in column.chars() {
        if !ch.is_ascii_uppercase() {
            return None;
        }
        index = index
            .checked_mul(26)?
            .checked_add(ch as usize - 'A' as usize + 1)?;
    }
    Some(index - 1)
}
