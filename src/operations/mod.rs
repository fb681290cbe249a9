pub mod op_helper;
pub mod name_op;
pub mod split_op;
pub mod find_op;
pub mod csv_op;
pub mod command_op;
