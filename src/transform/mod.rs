pub(crate) mod range_map;
