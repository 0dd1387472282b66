mod proptest_guess;
