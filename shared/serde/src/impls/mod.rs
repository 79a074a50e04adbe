mod collections;
mod math;
mod scalars;
mod string;
