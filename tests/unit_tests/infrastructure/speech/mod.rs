mod speech_synthesizer_factory_test;
