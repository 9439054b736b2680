pub(crate) mod frame_loop;
