/// Lifecycle of a (date, program) pair.
///
/// ```text
/// absent --create_program--> placeholder --add_exercise--> active
/// active --delete last exercise--> absent
/// placeholder --delete placeholder--> absent
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgramState {
    Absent,
    Placeholder,
    Active,
}
