mod test_identity_frame;
mod test_no_replay;
mod test_room_isolation;
