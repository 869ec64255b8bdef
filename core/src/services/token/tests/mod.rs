mod signature_tests;
