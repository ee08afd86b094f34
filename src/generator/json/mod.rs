pub mod singbox_output;
