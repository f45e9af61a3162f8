pub mod month;
pub mod slot_list;
