macro_rules! static_assert {
    ($cond:expr, $msg:expr) => {
        const _: () = assert!($cond, $msg);
    };
    ($cond:expr) => {
        static_assert!($cond, "Static assertion failed");
    };
}

pub(crate) use static_assert;
