// Text length limits shared by value objects

pub const MAX_LOW_TEXT_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;
pub const MAX_PHONE_LENGTH: usize = 20;
pub const MAX_WORK_EXPERIENCE_YEARS: u32 = 100;
