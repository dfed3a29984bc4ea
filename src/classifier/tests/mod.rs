mod adapter_test;
mod predict_test;
