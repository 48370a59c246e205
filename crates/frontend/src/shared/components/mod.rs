pub mod pagination_controls;
pub mod stat_card;
pub mod table_cells;
pub mod table_skeleton;
pub mod ui;
