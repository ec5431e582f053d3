mod tests_open_designs;
